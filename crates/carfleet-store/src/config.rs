//! Store configuration
//!
//! Layers, lowest precedence first:
//! 1. Built-in defaults
//! 2. Optional TOML file
//! 3. Environment variables with the `CARFLEET_` prefix
//!    (e.g. `CARFLEET_DATABASE_PATH`, `CARFLEET_BUSY_TIMEOUT_MS`)

use std::path::{Path, PathBuf};
use std::time::Duration;

use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "CARFLEET";

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or merged.
    #[error("configuration error: {0}")]
    Load(#[from] ::config::ConfigError),
    /// Values loaded but are not usable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Connection settings shared by every connection a provider opens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database file
    pub database_path: PathBuf,
    /// How long a connection waits on a locked database before failing
    pub busy_timeout_ms: u64,
    /// SQLite journal mode (`WAL`, `DELETE`, ...)
    pub journal_mode: String,
    pub foreign_keys: bool,
    /// Apply embedded migrations before use
    pub run_migrations: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("carfleet.db"),
            busy_timeout_ms: 5_000,
            journal_mode: "WAL".to_string(),
            foreign_keys: true,
            run_migrations: true,
        }
    }
}

impl StoreConfig {
    /// Config pointing at `path` with default settings
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: path.into(),
            ..Self::default()
        }
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// Reject values SQLite would silently misinterpret
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database_path is empty".to_string()));
        }
        let mode = self.journal_mode.to_ascii_uppercase();
        if !matches!(
            mode.as_str(),
            "DELETE" | "TRUNCATE" | "PERSIST" | "MEMORY" | "WAL" | "OFF"
        ) {
            return Err(ConfigError::Invalid(format!(
                "unknown journal_mode '{}'",
                self.journal_mode
            )));
        }
        Ok(())
    }
}

/// Load configuration by merging defaults, an optional TOML file and
/// `CARFLEET_*` environment variables.
///
/// # Errors
///
/// Returns `ConfigError::Load` if the file is missing or malformed, and
/// `ConfigError::Invalid` if the merged values fail validation.
pub fn load_config(config_path: Option<&Path>) -> Result<StoreConfig, ConfigError> {
    let mut builder = Config::builder().add_source(Config::try_from(&StoreConfig::default())?);

    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

    let store_config: StoreConfig = builder.build()?.try_deserialize()?;
    store_config.validate()?;

    tracing::debug!(
        database_path = %store_config.database_path.display(),
        journal_mode = %store_config.journal_mode,
        busy_timeout_ms = store_config.busy_timeout_ms,
        "store configuration loaded"
    );

    Ok(store_config)
}
