//! CLI command implementations

pub mod manufacturer;
pub mod migrate;

use std::sync::Arc;

use carfleet_store::errors::config_error;
use carfleet_store::{load_config, FileConnectionProvider, StoreConfig};

use crate::GlobalArgs;

/// Resolve the store configuration from file, environment and flags
pub fn resolve_config(global: &GlobalArgs) -> anyhow::Result<StoreConfig> {
    let mut config = load_config(global.config.as_deref()).map_err(config_error)?;
    if let Some(db) = &global.db {
        config.database_path = db.clone();
    }
    Ok(config)
}

/// Provider for the configured database file, creating its directory
pub fn open_provider(config: StoreConfig) -> anyhow::Result<Arc<FileConnectionProvider>> {
    let provider = FileConnectionProvider::create(config)?;
    Ok(Arc::new(provider))
}
