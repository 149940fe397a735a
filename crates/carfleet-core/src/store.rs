//! Abstract store trait (port) for manufacturer persistence.
//!
//! Adapters live in other crates (e.g. `carfleet-store` for SQLite).

use crate::errors::Result;
use crate::model::Manufacturer;

/// CRUD over manufacturers with logical deletion.
///
/// "Not found" is never an error: it is reported as `None`, an empty list,
/// or `false`. Every storage fault comes back as a `PersistenceError`.
pub trait ManufacturerStore: Send + Sync {
    /// Insert a new manufacturer and return it with the generated id set.
    fn create(&self, manufacturer: Manufacturer) -> Result<Manufacturer>;

    /// Look up a manufacturer by id, including logically deleted ones.
    fn get_by_id(&self, id: i64) -> Result<Option<Manufacturer>>;

    /// List every manufacturer that has not been logically deleted.
    ///
    /// Order is whatever the backing engine returns.
    fn get_all(&self) -> Result<Vec<Manufacturer>>;

    /// Overwrite name and country of the row matching `manufacturer.id`.
    ///
    /// Returns the input unchanged when a row was updated, `None` otherwise.
    fn update(&self, manufacturer: Manufacturer) -> Result<Option<Manufacturer>>;

    /// Logically delete by id. Returns true if a row was marked.
    fn delete(&self, id: i64) -> Result<bool>;
}
