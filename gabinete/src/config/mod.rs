//! Configuration system for the `Gabinete` board.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/gabinete/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use gabinete_model::access::{Feature, PermissionLevel, Role};

use crate::board::{BoardLimits, DEFAULT_MAX_TASKS_PER_COLUMN};
use crate::store::DEFAULT_STORAGE_KEY;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    storage: StorageFileConfig,
    board: BoardFileConfig,
    ui: UiFileConfig,
    session: SessionFileConfig,
}

/// `[storage]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct StorageFileConfig {
    data_dir: Option<PathBuf>,
    key: Option<String>,
}

/// `[board]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct BoardFileConfig {
    max_tasks_per_column: Option<usize>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    poll_timeout_ms: Option<u64>,
    mouse: Option<bool>,
}

/// `[session]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct SessionFileConfig {
    role_name: Option<String>,
    has_office: Option<bool>,
    permissions: Option<BTreeMap<Feature, PermissionLevel>>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Where the board is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageTarget {
    /// One JSON file per key under this directory.
    Directory(PathBuf),
    /// Nothing survives the process.
    InMemory,
}

/// Who is using the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Role whose permission table gates the board.
    pub role: Role,
    /// Whether the user is bound to an office.
    pub has_office: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            role: Role::new("staff").with(Feature::Tasks, PermissionLevel::Editor),
            has_office: true,
        }
    }
}

/// Fully resolved board configuration.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    // -- Storage --
    /// Persistence target.
    pub storage: StorageTarget,
    /// Key the board is stored under.
    pub storage_key: String,

    // -- Board --
    /// Column capacity guard.
    pub limits: BoardLimits,

    // -- UI --
    /// Poll timeout for the TUI event loop.
    pub poll_timeout: Duration,
    /// Whether mouse capture (drag and drop) is enabled.
    pub mouse: bool,

    // -- Session --
    /// Role and office bond used by the access gate.
    pub session: SessionConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage: StorageTarget::Directory(default_data_dir()),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            limits: BoardLimits {
                max_tasks_per_column: DEFAULT_MAX_TASKS_PER_COLUMN,
            },
            poll_timeout: Duration::from_millis(50),
            mouse: true,
            session: SessionConfig::default(),
        }
    }
}

impl BoardConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// If `--config` is given and the file does not exist, returns an
    /// error. Otherwise the default path
    /// (`~/.config/gabinete/config.toml`) is tried and silently ignored if
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve a `BoardConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        let storage = if cli.in_memory {
            StorageTarget::InMemory
        } else {
            cli.data_dir
                .clone()
                .or_else(|| file.storage.data_dir.clone())
                .map_or(defaults.storage, StorageTarget::Directory)
        };

        let mut role = defaults.session.role;
        if let Some(name) = &file.session.role_name {
            role.name.clone_from(name);
        }
        if let Some(permissions) = &file.session.permissions {
            role.permissions.clone_from(permissions);
        }
        if cli.read_only && role.can_view(Feature::Tasks) {
            role.permissions
                .insert(Feature::Tasks, PermissionLevel::ReadOnly);
        }

        Self {
            storage,
            storage_key: cli
                .storage_key
                .clone()
                .or_else(|| file.storage.key.clone())
                .unwrap_or(defaults.storage_key),
            limits: BoardLimits {
                max_tasks_per_column: file
                    .board
                    .max_tasks_per_column
                    .unwrap_or(defaults.limits.max_tasks_per_column),
            },
            poll_timeout: file
                .ui
                .poll_timeout_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
            mouse: file.ui.mouse.unwrap_or(defaults.mouse),
            session: SessionConfig {
                role,
                has_office: file
                    .session
                    .has_office
                    .unwrap_or(defaults.session.has_office),
            },
        }
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal kanban board for a legislative office")]
pub struct CliArgs {
    /// Path to config file (default: `~/.config/gabinete/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding the persisted board.
    #[arg(long, env = "GABINETE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Storage key of the board (file name without `.json`).
    #[arg(long)]
    pub storage_key: Option<String>,

    /// Keep the board in memory only; nothing is written to disk.
    #[arg(long)]
    pub in_memory: bool,

    /// Open the board read-only regardless of the configured role.
    #[arg(long)]
    pub read_only: bool,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "GABINETE_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/gabinete.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("gabinete")
}

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ConfigFile::default());
        };
        config_dir.join("gabinete").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
