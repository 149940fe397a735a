//! Migration runner
//!
//! Applies migrations with checksums and idempotency

use rusqlite::{Connection, OptionalExtension};

use crate::errors::{checksum_mismatch, from_rusqlite, migration_error, Result};
use crate::migrations::checksums::compute_checksum;
use crate::migrations::embedded::{get_migrations, Migration};
use crate::provider::ConnectionProvider;

/// Apply all pending migrations to the database
///
/// Returns the ids applied by this call (empty when already up to date).
pub fn apply_migrations(conn: &mut Connection) -> Result<Vec<&'static str>> {
    apply_all(conn, &get_migrations())
}

/// Apply pending migrations through a connection taken from `provider`
pub fn bootstrap(provider: &dyn ConnectionProvider) -> Result<Vec<&'static str>> {
    let mut conn = provider.get_connection()?;
    apply_migrations(&mut conn)
}

/// Ids of the migrations recorded in `schema_version`, in application order
pub fn applied_migrations(conn: &Connection) -> Result<Vec<String>> {
    create_schema_version_table(conn)?;
    let mut stmt = conn
        .prepare("SELECT migration_id FROM schema_version ORDER BY id")
        .map_err(from_rusqlite)?;
    let ids = stmt
        .query_map([], |row| row.get(0))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(from_rusqlite)?;
    Ok(ids)
}

fn apply_all(conn: &mut Connection, migrations: &[Migration]) -> Result<Vec<&'static str>> {
    create_schema_version_table(conn)?;

    let mut applied = Vec::new();
    for migration in migrations {
        if apply_migration(conn, migration)? {
            applied.push(migration.id);
        }
    }
    Ok(applied)
}

/// Create the schema_version table if it doesn't exist
fn create_schema_version_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY,
            migration_id TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL,
            checksum TEXT
        )",
        [],
    )
    .map_err(from_rusqlite)?;

    Ok(())
}

/// Apply a single migration if not already applied; true if it ran
fn apply_migration(conn: &mut Connection, migration: &Migration) -> Result<bool> {
    let checksum = compute_checksum(migration.sql);

    let recorded: Option<Option<String>> = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = ?1",
            [migration.id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;

    match recorded {
        Some(Some(ref previous)) if previous != &checksum => {
            return Err(checksum_mismatch(migration.id, previous, &checksum));
        }
        Some(_) => return Ok(false),
        None => {}
    }

    let tx = conn.transaction().map_err(from_rusqlite)?;

    tx.execute_batch(migration.sql)
        .map_err(|e| migration_error(migration.id, e))?;

    let now = chrono::Utc::now().timestamp();
    tx.execute(
        "INSERT INTO schema_version (migration_id, applied_at, checksum) VALUES (?1, ?2, ?3)",
        rusqlite::params![migration.id, now, checksum],
    )
    .map_err(from_rusqlite)?;

    tx.commit().map_err(from_rusqlite)?;

    tracing::info!(migration_id = migration.id, "migration applied");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use carfleet_core::FaultKind;

    #[test]
    fn test_apply_migrations() {
        let mut conn = Connection::open_in_memory().unwrap();
        let applied = apply_migrations(&mut conn).unwrap();
        assert_eq!(applied.len(), get_migrations().len());
    }

    #[test]
    fn test_idempotency() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        let applied = apply_migrations(&mut conn).unwrap();
        assert!(applied.is_empty());
    }

    #[test]
    fn test_edited_migration_is_rejected() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        conn.execute(
            "UPDATE schema_version SET checksum = 'deadbeef' WHERE migration_id = '001_manufacturers'",
            [],
        )
        .unwrap();

        let err = apply_migrations(&mut conn).unwrap_err();
        assert_eq!(err.kind(), FaultKind::Migration);
        assert!(err.message().contains("001_manufacturers"));
    }

    #[test]
    fn test_failing_migration_rolls_back() {
        let mut conn = Connection::open_in_memory().unwrap();
        let broken = [Migration {
            id: "900_broken",
            sql: "CREATE TABLE half (v INTEGER); INSERT INTO missing VALUES (1);",
        }];

        let err = apply_all(&mut conn, &broken).unwrap_err();
        assert_eq!(err.kind(), FaultKind::Migration);

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE name = 'half'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 0);
        assert!(applied_migrations(&conn).unwrap().is_empty());
    }
}
