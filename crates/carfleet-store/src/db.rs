//! Database connection management
//!
//! Opening and configuring SQLite connections from a `StoreConfig`.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::config::StoreConfig;
use crate::errors::{connection_error, Result};

/// Flags used for every connection the store opens
pub fn open_flags() -> OpenFlags {
    OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX
}

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let path = path.as_ref();
    Connection::open_with_flags(path, open_flags())
        .map_err(|e| connection_error(&path.display().to_string(), e))
}

/// Apply per-connection settings from the store configuration
pub fn configure(conn: &Connection, config: &StoreConfig) -> Result<()> {
    let target = config.database_path.display().to_string();

    conn.busy_timeout(config.busy_timeout())
        .map_err(|e| connection_error(&target, e))?;

    conn.pragma_update(None, "foreign_keys", config.foreign_keys)
        .map_err(|e| connection_error(&target, e))?;

    // journal_mode answers with the resulting mode; pragma_update discards it
    conn.pragma_update(None, "journal_mode", config.journal_mode.as_str())
        .map_err(|e| connection_error(&target, e))?;

    Ok(())
}
