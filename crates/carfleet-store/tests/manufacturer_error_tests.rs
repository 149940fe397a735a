// Storage faults surface as PersistenceError with operation context and cause.

use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use carfleet_core::{FaultKind, Manufacturer, ManufacturerStore, PersistenceError};
use carfleet_store::{
    ConnectionProvider, FileConnectionProvider, SharedMemoryProvider, SqliteManufacturerStore,
    StoreConfig,
};
use rusqlite::Connection;

/// Provider whose database is never reachable
struct Unreachable {
    attempts: AtomicUsize,
}

impl ConnectionProvider for Unreachable {
    fn get_connection(&self) -> carfleet_store::Result<Connection> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(PersistenceError::new(FaultKind::Connection)
            .with_op("connect")
            .with_message("connection refused"))
    }

    fn describe(&self) -> String {
        "unreachable".to_string()
    }
}

/// Store over a database where the schema was never applied
fn unmigrated_store() -> SqliteManufacturerStore {
    SqliteManufacturerStore::new(Arc::new(SharedMemoryProvider::new().unwrap()))
}

#[test]
fn test_create_error_names_the_record() {
    let store = unmigrated_store();

    let err = store
        .create(Manufacturer::new("Toyota", "Japan"))
        .unwrap_err();

    assert_eq!(err.kind(), FaultKind::Query);
    assert_eq!(err.op(), Some("create"));
    assert_eq!(
        err.message(),
        "Can't insert manufacturer to db Manufacturer{id=none, name=Toyota, country=Japan}"
    );

    let cause = err.source().expect("underlying fault attached");
    assert!(cause.to_string().contains("no such table"));
}

#[test]
fn test_each_operation_wraps_missing_table() {
    let store = unmigrated_store();

    let err = store.get_by_id(3).unwrap_err();
    assert_eq!(err.message(), "Can't get manufacturer by id 3");

    let err = store.get_all().unwrap_err();
    assert_eq!(err.message(), "Can't get all manufacturers from db");

    let err = store
        .update(Manufacturer::new("Lada", "Russia").with_id(2))
        .unwrap_err();
    assert_eq!(
        err.message(),
        "Can't update manufacturer Manufacturer{id=2, name=Lada, country=Russia}"
    );

    let err = store.delete(8).unwrap_err();
    assert_eq!(err.message(), "Can't delete manufacturer by id 8");
    assert!(err.to_string().starts_with("[ERR_QUERY] in operation 'delete'"));
}

#[test]
fn test_connection_failure_is_surfaced_without_retry() {
    let provider = Arc::new(Unreachable {
        attempts: AtomicUsize::new(0),
    });
    let store = SqliteManufacturerStore::new(provider.clone());

    let err = store.get_all().unwrap_err();
    assert_eq!(err.kind(), FaultKind::Connection);
    assert_eq!(err.op(), Some("get_all"));
    assert_eq!(provider.attempts.load(Ordering::SeqCst), 1);

    let err = store.delete(1).unwrap_err();
    assert_eq!(err.code(), "ERR_CONNECTION");
    assert_eq!(provider.attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn test_unopenable_file_is_connection_fault() {
    let provider = FileConnectionProvider::new(StoreConfig::for_path(
        "/nonexistent-carfleet-dir/deeper/fleet.db",
    ));
    let store = SqliteManufacturerStore::new(Arc::new(provider));

    let err = store
        .create(Manufacturer::new("Tata", "India"))
        .unwrap_err();

    assert_eq!(err.kind(), FaultKind::Connection);
    assert!(err.message().contains("name=Tata"));
    assert!(err.source().is_some());
}

#[test]
fn test_store_keeps_working_after_a_failed_call() {
    let provider = Arc::new(SharedMemoryProvider::new().unwrap());
    let store = SqliteManufacturerStore::new(provider.clone());

    assert!(store.get_all().is_err());

    carfleet_store::migrations::bootstrap(provider.as_ref()).unwrap();
    let created = store
        .create(Manufacturer::new("Dacia", "Romania"))
        .unwrap();
    assert_eq!(store.get_all().unwrap(), vec![created]);
}
