//! CarFleet Store - SQLite persistence for manufacturers
//!
//! Provides:
//! - `ConnectionProvider` implementations (file-backed, shared in-memory)
//! - `SqliteManufacturerStore`, the SQLite adapter for `ManufacturerStore`
//! - Embedded schema migrations with checksums
//! - Layered store configuration (defaults, TOML file, environment)
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use carfleet_core::{Manufacturer, ManufacturerStore};
//! use carfleet_store::{FileConnectionProvider, SqliteManufacturerStore, StoreConfig};
//!
//! let provider = Arc::new(FileConnectionProvider::new(StoreConfig::for_path("fleet.db")));
//! carfleet_store::migrations::bootstrap(provider.as_ref())?;
//!
//! let store = SqliteManufacturerStore::new(provider);
//! let toyota = store.create(Manufacturer::new("Toyota", "Japan"))?;
//! assert!(toyota.id.is_some());
//! # Ok::<(), carfleet_core::PersistenceError>(())
//! ```

pub mod config;
pub mod db;
pub mod errors;
pub mod manufacturer;
pub mod migrations;
pub mod provider;

// Re-export key types
pub use crate::config::{load_config, ConfigError, StoreConfig};
pub use errors::Result;
pub use manufacturer::SqliteManufacturerStore;
pub use provider::{ConnectionProvider, FileConnectionProvider, SharedMemoryProvider};
