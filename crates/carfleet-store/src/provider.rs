//! Connection providers
//!
//! The store asks its provider for a fresh connection on every operation
//! and drops it before returning. Providers decide where connections point
//! and how they are configured; the store never touches credentials,
//! pooling, or isolation settings.

use std::fs;
use std::sync::Mutex;

use rusqlite::Connection;

use crate::config::StoreConfig;
use crate::db;
use crate::errors::{connection_error, io_error, Result};

/// Hands out live database connections.
///
/// Implementations must be safe to share across threads; each returned
/// connection is owned exclusively by the caller.
pub trait ConnectionProvider: Send + Sync {
    /// Open a connection ready for use.
    ///
    /// # Errors
    ///
    /// Returns a `PersistenceError` of kind `Connection` when no connection
    /// can be established or configured.
    fn get_connection(&self) -> Result<Connection>;

    /// Human-readable description of the target, for logs and messages.
    fn describe(&self) -> String;
}

/// Opens the configured SQLite file on every call
#[derive(Debug, Clone)]
pub struct FileConnectionProvider {
    config: StoreConfig,
}

impl FileConnectionProvider {
    /// Provider for `config.database_path`; the file is created on first use
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Like `new`, but also creates the parent directory of the database file
    pub fn create(config: StoreConfig) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| io_error("create_database_dir", e))?;
            }
        }
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

impl ConnectionProvider for FileConnectionProvider {
    fn get_connection(&self) -> Result<Connection> {
        let conn = db::open(&self.config.database_path)?;
        db::configure(&conn, &self.config)?;
        tracing::debug!(target_db = %self.describe(), "connection opened");
        Ok(conn)
    }

    fn describe(&self) -> String {
        self.config.database_path.display().to_string()
    }
}

/// Named shared-cache in-memory database
///
/// SQLite drops a shared in-memory database when its last connection
/// closes, so the provider keeps one anchor connection open for its own
/// lifetime. Intended for tests and throwaway CLI sessions; connections in
/// different threads contend on shared-cache table locks.
pub struct SharedMemoryProvider {
    uri: String,
    _anchor: Mutex<Connection>,
}

impl SharedMemoryProvider {
    /// Fresh database with a unique name
    pub fn new() -> Result<Self> {
        Self::named(&format!("carfleet-{}", uuid::Uuid::new_v4()))
    }

    /// Database identified by `name`; providers with the same name in one
    /// process see the same data.
    pub fn named(name: &str) -> Result<Self> {
        let uri = format!("file:{}?mode=memory&cache=shared", name);
        let anchor = Self::open_uri(&uri)?;
        Ok(Self {
            uri,
            _anchor: Mutex::new(anchor),
        })
    }

    fn open_uri(uri: &str) -> Result<Connection> {
        Connection::open_with_flags(uri, db::open_flags()).map_err(|e| connection_error(uri, e))
    }
}

impl ConnectionProvider for SharedMemoryProvider {
    fn get_connection(&self) -> Result<Connection> {
        let conn = Self::open_uri(&self.uri)?;
        tracing::debug!(target_db = %self.uri, "connection opened");
        Ok(conn)
    }

    fn describe(&self) -> String {
        self.uri.clone()
    }
}
