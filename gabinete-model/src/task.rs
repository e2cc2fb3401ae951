//! Task cards and partial updates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::column::Column;

/// Default card background for newly created tasks.
pub const DEFAULT_TASK_COLOR: &str = "#e2e8f0";

/// Placeholder used for `owner` and `responsible` on new tasks.
pub const UNASSIGNED: &str = "unassigned";

/// Opaque task identifier.
///
/// New ids are UUID v7 strings, but any non-empty string loaded from storage
/// is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh, time-ordered identifier (UUID v7).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Wraps an existing identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is the empty string (never valid on a board).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A unit of work shown as a card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable identifier, used as the reorder/transfer key.
    pub id: TaskId,
    /// Editable title.
    pub title: String,
    /// Free text, display-only on the board.
    pub description: String,
    /// Column currently holding the task. Must match the sequence it is
    /// stored in.
    pub column: Column,
    /// Card background (`#rrggbb`). Presentation only.
    pub color: String,
    /// Small positive integer, informational.
    pub priority: u32,
    /// Who created the task.
    pub owner: String,
    /// Who is assigned to it.
    pub responsible: String,
}

impl Task {
    /// Builds the blank task that a column's "add" affordance inserts.
    #[must_use]
    pub fn blank(column: Column) -> Self {
        Self {
            id: TaskId::generate(),
            title: format!("New {} task", column.label()),
            description: String::new(),
            column,
            color: DEFAULT_TASK_COLOR.to_string(),
            priority: 1,
            owner: UNASSIGNED.to_string(),
            responsible: UNASSIGNED.to_string(),
        }
    }

    /// Merges the fields carried by `patch` into this task.
    ///
    /// Returns `true` if any field actually changed.
    pub fn apply(&mut self, patch: &TaskPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        let before = self.clone();
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(color) = &patch.color {
            self.color.clone_from(color);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(owner) = &patch.owner {
            self.owner.clone_from(owner);
        }
        if let Some(responsible) = &patch.responsible {
            self.responsible.clone_from(responsible);
        }
        *self != before
    }
}

/// A partial update to a task.
///
/// `id` and `column` are not patchable: identity is fixed and column
/// membership only changes through a drag transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskPatch {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New card color.
    pub color: Option<String>,
    /// New priority.
    pub priority: Option<u32>,
    /// New owner.
    pub owner: Option<String>,
    /// New responsible.
    pub responsible: Option<String>,
}

impl TaskPatch {
    /// Patch that only changes the title.
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Whether the patch carries no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.color.is_none()
            && self.priority.is_none()
            && self.owner.is_none()
            && self.responsible.is_none()
    }
}
