//! CLI integration tests
//!
//! Drive the `carfleet` binary against a temporary database file and check
//! its JSON output, exit codes and on-disk effects.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use rusqlite::Connection;
use serde_json::Value;
use tempfile::TempDir;

fn carfleet(db_path: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_carfleet"))
        .args(args)
        .args(["--db", db_path.to_str().unwrap()])
        .env("RUST_LOG", "off")
        .env_remove("CARFLEET_DATABASE_PATH")
        .env_remove("CARFLEET_RUN_MIGRATIONS")
        .output()
        .expect("Failed to execute CLI")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn temp_db() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("fleet.db");
    (temp_dir, db_path)
}

#[test]
fn test_migrate_reports_applied_then_nothing() {
    let (_dir, db_path) = temp_db();

    let first = stdout_json(&carfleet(&db_path, &["migrate"]));
    let applied = first["applied"].as_array().unwrap();
    assert!(applied.iter().any(|id| id == "001_manufacturers"));

    let second = stdout_json(&carfleet(&db_path, &["migrate"]));
    assert_eq!(second["applied"], serde_json::json!([]));
}

#[test]
fn test_create_get_list_roundtrip() {
    let (_dir, db_path) = temp_db();

    let created = stdout_json(&carfleet(
        &db_path,
        &["manufacturer", "create", "--name", "Toyota", "--country", "Japan"],
    ));
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Toyota");
    assert_eq!(created["country"], "Japan");

    let fetched = stdout_json(&carfleet(&db_path, &["manufacturer", "get", "1"]));
    assert_eq!(fetched, created);

    let listed = stdout_json(&carfleet(&db_path, &["manufacturer", "list"]));
    assert_eq!(listed, serde_json::json!([created]));
}

#[test]
fn test_get_missing_exits_with_error() {
    let (_dir, db_path) = temp_db();

    let output = carfleet(&db_path, &["manufacturer", "get", "42"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: manufacturer 42 not found"), "{}", stderr);
    assert!(output.stdout.is_empty());
}

#[test]
fn test_update_existing_and_missing() {
    let (_dir, db_path) = temp_db();
    stdout_json(&carfleet(
        &db_path,
        &["manufacturer", "create", "--name", "Toyota", "--country", "Japan"],
    ));

    let updated = stdout_json(&carfleet(
        &db_path,
        &["manufacturer", "update", "1", "--name", "Toyota", "--country", "USA"],
    ));
    assert_eq!(updated["country"], "USA");

    let output = carfleet(
        &db_path,
        &["manufacturer", "update", "9", "--name", "Ghost", "--country", "Nowhere"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("manufacturer 9 not found"));
}

#[test]
fn test_delete_hides_from_list_but_not_get() {
    let (_dir, db_path) = temp_db();
    stdout_json(&carfleet(
        &db_path,
        &["manufacturer", "create", "--name", "Skoda", "--country", "Czechia"],
    ));

    let deleted = stdout_json(&carfleet(&db_path, &["manufacturer", "delete", "1"]));
    assert_eq!(deleted, serde_json::json!({ "id": 1, "deleted": true }));

    let listed = stdout_json(&carfleet(&db_path, &["manufacturer", "list"]));
    assert_eq!(listed, serde_json::json!([]));

    let fetched = stdout_json(&carfleet(&db_path, &["manufacturer", "get", "1"]));
    assert_eq!(fetched["name"], "Skoda");

    let conn = Connection::open(&db_path).unwrap();
    let flag: bool = conn
        .query_row("SELECT is_deleted FROM manufacturers WHERE id = 1", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert!(flag);
}

#[test]
fn test_delete_missing_reports_false() {
    let (_dir, db_path) = temp_db();

    let deleted = stdout_json(&carfleet(&db_path, &["manufacturer", "delete", "3"]));
    assert_eq!(deleted["deleted"], false);
}

#[test]
fn test_config_file_disabling_migrations_surfaces_store_error() {
    let (dir, db_path) = temp_db();
    let config_path = dir.path().join("carfleet.toml");
    std::fs::write(&config_path, "run_migrations = false\n").unwrap();

    let output = carfleet(
        &db_path,
        &["--config", config_path.to_str().unwrap(), "manufacturer", "list"],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Can't get all manufacturers from db"),
        "{}",
        stderr
    );
}

#[test]
fn test_malformed_config_file_reports_config_fault() {
    let (dir, db_path) = temp_db();
    let config_path = dir.path().join("carfleet.toml");
    std::fs::write(&config_path, "busy_timeout_ms = = 10\n").unwrap();

    let output = carfleet(
        &db_path,
        &["--config", config_path.to_str().unwrap(), "manufacturer", "list"],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error: [ERR_CONFIG] in operation 'load_config'"),
        "{}",
        stderr
    );
    assert!(!db_path.exists());
}
