/// Result type alias using PersistenceError
pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Boxed underlying fault carried as the cause of a `PersistenceError`
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

// ========== Error Facility ==========

/// Classification of the storage-layer fault behind a `PersistenceError`
///
/// Every store operation returns the same error type; the kind only
/// describes what went wrong underneath so callers and log pipelines can
/// group failures by a stable code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// No connection could be established or configured
    Connection,
    /// A statement failed to prepare, execute, or map its rows
    Query,
    /// The database rejected a write (NOT NULL, UNIQUE, CHECK, ...)
    Constraint,
    /// Schema bootstrap failed or a recorded migration checksum differs
    Migration,
    /// Store configuration could not be loaded
    Config,
    /// A filesystem operation around the database failed
    Io,
}

impl FaultKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            FaultKind::Connection => "ERR_CONNECTION",
            FaultKind::Query => "ERR_QUERY",
            FaultKind::Constraint => "ERR_CONSTRAINT",
            FaultKind::Migration => "ERR_MIGRATION",
            FaultKind::Config => "ERR_CONFIG",
            FaultKind::Io => "ERR_IO",
        }
    }
}

/// The single error type surfaced by manufacturer persistence
///
/// Carries a human-readable message naming the attempted operation and its
/// input, plus the underlying fault as its cause (reachable through
/// `std::error::Error::source`).
#[derive(Debug)]
pub struct PersistenceError {
    kind: FaultKind,
    op: Option<String>,
    message: String,
    cause: Option<Cause>,
}

impl PersistenceError {
    /// Create a new error with the specified kind
    pub fn new(kind: FaultKind) -> Self {
        Self {
            kind,
            op: None,
            message: String::new(),
            cause: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the underlying fault
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Re-describe an error raised below the operation boundary.
    ///
    /// Keeps kind and cause; replaces op and message with the caller's.
    pub fn context(self, op: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            op: Some(op.into()),
            message: message.into(),
            ..self
        }
    }

    /// Get the fault kind
    pub fn kind(&self) -> FaultKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the underlying fault, if any
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(cause) = &self.cause {
            write!(f, " (caused by: {})", cause)?;
        }
        Ok(())
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|c| c as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========
