//! Role permissions and the per-screen access gate.
//!
//! A role carries one [`PermissionLevel`] per [`Feature`]. The gate maps the
//! current session (role + whether the user is bound to an office) to what a
//! screen may do.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Screens/features a role can be granted access to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    /// Constituent registry.
    Voters,
    /// Team members.
    Team,
    /// Roles and permissions.
    Roles,
    /// Constituent demands.
    Demands,
    /// The kanban task board.
    Tasks,
    /// Office (tenant) settings.
    Office,
}

impl Feature {
    /// Every feature, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Voters,
        Self::Team,
        Self::Roles,
        Self::Demands,
        Self::Tasks,
        Self::Office,
    ];
}

/// Error returned when a raw permission level is out of range.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("invalid permission level {0} (expected 0, 1 or 2)")]
pub struct AccessError(pub u8);

/// How much a role may do with a feature.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum PermissionLevel {
    /// Feature hidden.
    #[default]
    Disabled,
    /// May view, may not change anything.
    ReadOnly,
    /// Full access.
    Editor,
}

impl PermissionLevel {
    /// Parses the numeric level used in role records.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] for anything other than 0, 1 or 2.
    pub const fn from_level(level: u8) -> Result<Self, AccessError> {
        match level {
            0 => Ok(Self::Disabled),
            1 => Ok(Self::ReadOnly),
            2 => Ok(Self::Editor),
            other => Err(AccessError(other)),
        }
    }

    /// Numeric level.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Disabled => 0,
            Self::ReadOnly => 1,
            Self::Editor => 2,
        }
    }
}

impl TryFrom<u8> for PermissionLevel {
    type Error = AccessError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_level(value)
    }
}

impl From<PermissionLevel> for u8 {
    fn from(value: PermissionLevel) -> Self {
        value.level()
    }
}

/// A named role with its permission table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Display name.
    pub name: String,
    /// Level per feature. Missing features are disabled.
    #[serde(default)]
    pub permissions: BTreeMap<Feature, PermissionLevel>,
}

impl Role {
    /// Creates a role with no permissions.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permissions: BTreeMap::new(),
        }
    }

    /// Builder-style grant.
    #[must_use]
    pub fn with(mut self, feature: Feature, level: PermissionLevel) -> Self {
        self.permissions.insert(feature, level);
        self
    }

    /// Level for `feature`, `Disabled` when absent.
    #[must_use]
    pub fn level(&self, feature: Feature) -> PermissionLevel {
        self.permissions.get(&feature).copied().unwrap_or_default()
    }

    /// Whether the feature is visible at all.
    #[must_use]
    pub fn can_view(&self, feature: Feature) -> bool {
        self.level(feature) >= PermissionLevel::ReadOnly
    }

    /// Whether the feature may be changed.
    #[must_use]
    pub fn can_edit(&self, feature: Feature) -> bool {
        self.level(feature) == PermissionLevel::Editor
    }
}

/// Outcome of gating a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// The screen is shown.
    Granted {
        /// Mutations must be refused.
        read_only: bool,
    },
    /// The role does not grant the feature (or there is no role).
    NoPermission,
    /// The user is not bound to any office.
    NoTenantBond,
}

impl RouteAccess {
    /// Whether the screen can be shown.
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted { .. })
    }
}

/// Decides access to `feature` for the current session.
///
/// The office bond is checked first: without it nothing is reachable.
#[must_use]
pub fn gate(role: Option<&Role>, has_office: bool, feature: Feature) -> RouteAccess {
    if !has_office {
        return RouteAccess::NoTenantBond;
    }
    match role.map(|r| r.level(feature)) {
        None | Some(PermissionLevel::Disabled) => RouteAccess::NoPermission,
        Some(PermissionLevel::ReadOnly) => RouteAccess::Granted { read_only: true },
        Some(PermissionLevel::Editor) => RouteAccess::Granted { read_only: false },
    }
}
