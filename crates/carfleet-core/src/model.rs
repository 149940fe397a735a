use serde::{Deserialize, Serialize};

/// Manufacturer - a vehicle maker known to the fleet
///
/// The persisted `is_deleted` flag is deliberately absent: logical deletion
/// is a storage concern and never travels with the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    /// Storage-generated identifier; `None` until the record is created
    pub id: Option<i64>,

    /// Maker name, e.g. "Toyota"
    pub name: String,

    /// Country of origin, e.g. "Japan"
    pub country: String,
}

impl Manufacturer {
    /// Create an unsaved manufacturer (no id yet)
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            country: country.into(),
        }
    }

    /// Set the identifier
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

impl std::fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "Manufacturer{{id={}", id)?,
            None => write!(f, "Manufacturer{{id=none")?,
        }
        write!(f, ", name={}, country={}}}", self.name, self.country)
    }
}
