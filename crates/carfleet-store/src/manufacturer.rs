//! SQLite implementation of `ManufacturerStore`
//!
//! ## Logging Ownership
//!
//! Each public operation owns its lifecycle logging:
//! - `log_op_start!` at entry, with the operation's input
//! - `log_op_end!` on success, with a result summary
//! - `log_op_error!` on failure
//!
//! Providers and migrations below this layer only emit `debug!`/`info!`.

use std::sync::Arc;
use std::time::Instant;

use carfleet_core::{log_op_end, log_op_error, log_op_start};
use carfleet_core::{Manufacturer, ManufacturerStore};
use rusqlite::{params, OptionalExtension, Row};

use crate::errors::{from_rusqlite, Result};
use crate::provider::ConnectionProvider;

const INSERT_SQL: &str = "INSERT INTO manufacturers(name, country) VALUES (?1, ?2)";
const GET_BY_ID_SQL: &str = "SELECT * FROM manufacturers WHERE id = ?1";
const GET_ALL_SQL: &str = "SELECT * FROM manufacturers WHERE is_deleted = false";
const UPDATE_SQL: &str = "UPDATE manufacturers SET name = ?1, country = ?2 WHERE id = ?3";
const DELETE_SQL: &str = "UPDATE manufacturers SET is_deleted = true WHERE id = ?1";

/// Manufacturer store over any `ConnectionProvider`.
///
/// Holds no connection of its own: every call takes one from the provider
/// and drops it before returning, on success and on error alike.
#[derive(Clone)]
pub struct SqliteManufacturerStore {
    provider: Arc<dyn ConnectionProvider>,
}

impl SqliteManufacturerStore {
    pub fn new(provider: Arc<dyn ConnectionProvider>) -> Self {
        Self { provider }
    }

    /// The provider connections are drawn from
    pub fn provider(&self) -> &dyn ConnectionProvider {
        self.provider.as_ref()
    }

    fn create_impl(&self, mut manufacturer: Manufacturer) -> Result<Manufacturer> {
        let conn = self.provider.get_connection()?;
        conn.execute(INSERT_SQL, params![manufacturer.name, manufacturer.country])
            .map_err(from_rusqlite)?;
        // Same connection, so this is the row we just inserted
        manufacturer.id = Some(conn.last_insert_rowid());
        Ok(manufacturer)
    }

    fn get_by_id_impl(&self, id: i64) -> Result<Option<Manufacturer>> {
        let conn = self.provider.get_connection()?;
        let mut stmt = conn.prepare(GET_BY_ID_SQL).map_err(from_rusqlite)?;
        let found = stmt
            .query_row(params![id], row_to_manufacturer)
            .optional()
            .map_err(from_rusqlite)?;
        Ok(found)
    }

    fn get_all_impl(&self) -> Result<Vec<Manufacturer>> {
        let conn = self.provider.get_connection()?;
        let mut stmt = conn.prepare(GET_ALL_SQL).map_err(from_rusqlite)?;
        let manufacturers = stmt
            .query_map([], row_to_manufacturer)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(manufacturers)
    }

    fn update_impl(&self, manufacturer: Manufacturer) -> Result<Option<Manufacturer>> {
        let conn = self.provider.get_connection()?;
        // An unset id binds as NULL and matches nothing
        let affected = conn
            .execute(
                UPDATE_SQL,
                params![manufacturer.name, manufacturer.country, manufacturer.id],
            )
            .map_err(from_rusqlite)?;
        Ok((affected >= 1).then_some(manufacturer))
    }

    fn delete_impl(&self, id: i64) -> Result<bool> {
        let conn = self.provider.get_connection()?;
        let affected = conn.execute(DELETE_SQL, params![id]).map_err(from_rusqlite)?;
        Ok(affected >= 1)
    }
}

impl ManufacturerStore for SqliteManufacturerStore {
    fn create(&self, manufacturer: Manufacturer) -> Result<Manufacturer> {
        log_op_start!("manufacturer_create", manufacturer = %manufacturer);
        let start = Instant::now();
        let described = manufacturer.to_string();

        let created = self.create_impl(manufacturer).map_err(|e| {
            let e = e.context(
                "create",
                format!("Can't insert manufacturer to db {}", described),
            );
            log_op_error!(
                "manufacturer_create",
                e,
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "manufacturer_create",
            duration_ms = start.elapsed().as_millis() as u64,
            manufacturer_id = created.id
        );
        Ok(created)
    }

    fn get_by_id(&self, id: i64) -> Result<Option<Manufacturer>> {
        log_op_start!("manufacturer_get_by_id", manufacturer_id = id);
        let start = Instant::now();

        let found = self.get_by_id_impl(id).map_err(|e| {
            let e = e.context("get_by_id", format!("Can't get manufacturer by id {}", id));
            log_op_error!(
                "manufacturer_get_by_id",
                e,
                duration_ms = start.elapsed().as_millis() as u64,
                manufacturer_id = id
            );
            e
        })?;

        log_op_end!(
            "manufacturer_get_by_id",
            duration_ms = start.elapsed().as_millis() as u64,
            manufacturer_id = id,
            found = found.is_some()
        );
        Ok(found)
    }

    fn get_all(&self) -> Result<Vec<Manufacturer>> {
        log_op_start!("manufacturer_get_all");
        let start = Instant::now();

        let manufacturers = self.get_all_impl().map_err(|e| {
            let e = e.context("get_all", "Can't get all manufacturers from db");
            log_op_error!(
                "manufacturer_get_all",
                e,
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "manufacturer_get_all",
            duration_ms = start.elapsed().as_millis() as u64,
            rows = manufacturers.len() as u64
        );
        Ok(manufacturers)
    }

    fn update(&self, manufacturer: Manufacturer) -> Result<Option<Manufacturer>> {
        log_op_start!("manufacturer_update", manufacturer = %manufacturer);
        let start = Instant::now();
        let described = manufacturer.to_string();
        let id = manufacturer.id;

        let updated = self.update_impl(manufacturer).map_err(|e| {
            let e = e.context("update", format!("Can't update manufacturer {}", described));
            log_op_error!(
                "manufacturer_update",
                e,
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "manufacturer_update",
            duration_ms = start.elapsed().as_millis() as u64,
            manufacturer_id = id,
            updated = updated.is_some()
        );
        Ok(updated)
    }

    fn delete(&self, id: i64) -> Result<bool> {
        log_op_start!("manufacturer_delete", manufacturer_id = id);
        let start = Instant::now();

        let deleted = self.delete_impl(id).map_err(|e| {
            let e = e.context("delete", format!("Can't delete manufacturer by id {}", id));
            log_op_error!(
                "manufacturer_delete",
                e,
                duration_ms = start.elapsed().as_millis() as u64,
                manufacturer_id = id
            );
            e
        })?;

        log_op_end!(
            "manufacturer_delete",
            duration_ms = start.elapsed().as_millis() as u64,
            manufacturer_id = id,
            deleted = deleted
        );
        Ok(deleted)
    }
}

/// Maps a `SELECT *` row to a `Manufacturer`; `is_deleted` is not carried over.
fn row_to_manufacturer(row: &Row<'_>) -> rusqlite::Result<Manufacturer> {
    Ok(Manufacturer {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        country: row.get("country")?,
    })
}
