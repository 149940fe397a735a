//! Structured logging facility for CarFleet
//!
//! This module provides a canonical logging facility with:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use carfleet_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```
//!
//! # Logging Macros
//!
//! - `log_op_start!(op, ...)` - Log operation start
//! - `log_op_end!(op, duration_ms = ...)` - Log operation end
//! - `log_op_error!(op, err, duration_ms = ...)` - Log operation error
//!
//! Logs are written to stderr so command output on stdout stays parseable.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use carfleet_core_types::schema;
pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};

#[doc(hidden)]
pub use tracing as __tracing;
