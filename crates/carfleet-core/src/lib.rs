//! CarFleet Core - domain model and facilities for manufacturer persistence
//!
//! This crate provides:
//! - The `Manufacturer` value type
//! - The `ManufacturerStore` port implemented by storage adapters
//! - The error facility (`PersistenceError`, `FaultKind`)
//! - The structured logging facility (`init`, `log_op_*` macros, test capture)
//!
//! It has no storage dependency; the SQLite adapter lives in `carfleet-store`.

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod store;

// Re-export commonly used types
pub use errors::{FaultKind, PersistenceError, Result};
pub use model::Manufacturer;
pub use store::ManufacturerStore;
