//! Checksum validation for migrations
//!
//! SHA-256 of the migration SQL, recorded when applied and compared on
//! every later run to detect edited migrations.

use sha2::{Digest, Sha256};

/// Compute SHA256 checksum of a string
pub fn compute_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
