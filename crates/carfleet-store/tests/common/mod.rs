//! Shared fixtures for carfleet-store integration tests

#![allow(dead_code)]

use std::sync::Arc;

use carfleet_store::{
    migrations, FileConnectionProvider, SharedMemoryProvider, SqliteManufacturerStore,
    StoreConfig,
};
use tempfile::TempDir;

/// Migrated store over a fresh shared in-memory database
pub fn memory_store() -> SqliteManufacturerStore {
    let provider = SharedMemoryProvider::new().expect("open shared memory db");
    migrations::bootstrap(&provider).expect("apply migrations");
    SqliteManufacturerStore::new(Arc::new(provider))
}

/// Migrated store over a file database inside a temp dir.
///
/// Keep the `TempDir` alive for as long as the store is used.
pub fn file_store() -> (TempDir, SqliteManufacturerStore) {
    let dir = TempDir::new().expect("temp dir");
    let provider = FileConnectionProvider::new(StoreConfig::for_path(dir.path().join("fleet.db")));
    migrations::bootstrap(&provider).expect("apply migrations");
    (dir, SqliteManufacturerStore::new(Arc::new(provider)))
}

/// Read the raw deletion flag, bypassing the store
pub fn is_deleted_flag(store: &SqliteManufacturerStore, id: i64) -> bool {
    let conn = store.provider().get_connection().expect("connection");
    conn.query_row(
        "SELECT is_deleted FROM manufacturers WHERE id = ?1",
        [id],
        |row| row.get(0),
    )
    .expect("row exists")
}
