//! Canonical logging macros
//!
//! Every store operation brackets its work with these so log pipelines can
//! pair `start` with `end` / `end_error` by `op`.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use carfleet_core::log_op_start;
/// log_op_start!("manufacturer_get_all");
/// log_op_start!("manufacturer_get_by_id", manufacturer_id = 7);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        $crate::logging_facility::__tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        $crate::logging_facility::__tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use carfleet_core::log_op_end;
/// log_op_end!("manufacturer_delete", duration_ms = 3, deleted = true);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        $crate::logging_facility::__tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        $crate::logging_facility::__tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Takes the `PersistenceError` by reference and records its kind and code.
///
/// # Example
///
/// ```
/// # use carfleet_core::log_op_error;
/// use carfleet_core::{FaultKind, PersistenceError};
/// let err = PersistenceError::new(FaultKind::Query).with_message("no such table");
/// log_op_error!("manufacturer_get_all", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let err: &$crate::errors::PersistenceError = &$err;
        $crate::logging_facility::__tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?err.kind(),
            err_code = err.code(),
            error = %err,
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let err: &$crate::errors::PersistenceError = &$err;
        $crate::logging_facility::__tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?err.kind(),
            err_code = err.code(),
            error = %err,
            $($field)*
        );
    }};
}
