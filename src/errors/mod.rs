//! # Error Handling
//!
//! Crate-wide error types for the Wardplane control plane, built on
//! `thiserror`. Every failure is recovered at the request boundary and
//! mapped to a stable HTTP status by the API layer.

/// Custom result type for Wardplane operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Wardplane control plane
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database and storage errors
    #[error("Database error: {context}")]
    Database {
        #[source]
        source: sqlx::Error,
        context: String,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation errors (malformed upstream URL, bad input)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown project or credential reference
    #[error("{resource} not found: '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Double revocation or an invariant-violating concurrent issue
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Worker shared-secret mismatch or missing header
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not-found error for a resource type and identifier
    pub fn not_found<I: Into<String>>(resource: &'static str, id: I) -> Self {
        Self::NotFound { resource, id: id.into() }
    }

    /// Create a conflict error
    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    /// Create an unauthorized error
    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Wrap a sqlx error with operation context
    pub fn database<S: Into<String>>(source: sqlx::Error, context: S) -> Self {
        Self::Database { source, context: context.into() }
    }

    /// Whether the underlying failure is a uniqueness-constraint violation.
    ///
    /// Used by the issuance path to tell a lost swap race apart from a
    /// generic storage fault.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Error::Database { source, .. } => source
                .as_database_error()
                .map(|db_err| db_err.is_unique_violation())
                .unwrap_or(false),
            _ => false,
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, field_errors)| {
                let messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| {
                        e.message.as_ref().map_or("Invalid value".to_string(), |m| m.to_string())
                    })
                    .collect();
                format!("{}: {}", field, messages.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ");

        Self::validation(message)
    }
}
