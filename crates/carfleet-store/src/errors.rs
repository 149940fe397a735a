//! Error helpers for carfleet-store
//!
//! Build `PersistenceError`s from the faults this crate runs into, picking
//! the `FaultKind` from the underlying error.

use carfleet_core::errors::{FaultKind, PersistenceError};
use rusqlite::ErrorCode;

use crate::config::ConfigError;

/// Result type alias using PersistenceError
pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Classify a rusqlite error
pub fn fault_kind(err: &rusqlite::Error) -> FaultKind {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => match e.code {
            ErrorCode::ConstraintViolation => FaultKind::Constraint,
            ErrorCode::CannotOpen | ErrorCode::NotADatabase | ErrorCode::PermissionDenied => {
                FaultKind::Connection
            }
            _ => FaultKind::Query,
        },
        rusqlite::Error::InvalidPath(_) => FaultKind::Connection,
        _ => FaultKind::Query,
    }
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> PersistenceError {
    PersistenceError::new(fault_kind(&err))
        .with_op("sqlite")
        .with_message(err.to_string())
        .with_cause(err)
}

/// Create a connection error for a database that could not be opened or configured
pub fn connection_error(target: &str, err: rusqlite::Error) -> PersistenceError {
    PersistenceError::new(FaultKind::Connection)
        .with_op("connect")
        .with_message(format!("Can't open connection to {}: {}", target, err))
        .with_cause(err)
}

/// Create a migration error
pub fn migration_error(migration_id: &str, err: rusqlite::Error) -> PersistenceError {
    PersistenceError::new(FaultKind::Migration)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, err))
        .with_cause(err)
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> PersistenceError {
    PersistenceError::new(FaultKind::Migration)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a configuration error
pub fn config_error(err: ConfigError) -> PersistenceError {
    PersistenceError::new(FaultKind::Config)
        .with_op("load_config")
        .with_message("Can't load store configuration")
        .with_cause(err)
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> PersistenceError {
    PersistenceError::new(FaultKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
        .with_cause(err)
}
