//! Error types for Ledgerbook
//!
//! Every fallible operation in the crate returns [`LedgerResult`]. Validation
//! failures are raised before anything is mutated; provider failures are
//! passed through to the caller unchanged.

use thiserror::Error;

/// The main error type for Ledgerbook operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A book name was empty or whitespace-only
    #[error("Book name cannot be empty")]
    EmptyName,

    /// An entry description was empty or whitespace-only
    #[error("Description cannot be empty")]
    EmptyDescription,

    /// An amount was not a finite, non-negative number
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    AlreadyExists {
        entity_type: &'static str,
        identifier: String,
    },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The persistence provider cannot currently accept requests
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Create a "not found" error for books
    pub fn book_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Book",
            identifier: name.into(),
        }
    }

    /// Create a "not found" error for entries
    pub fn entry_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Entry",
            identifier: identifier.into(),
        }
    }

    /// Create an "already exists" error for books
    pub fn book_exists(name: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity_type: "Book",
            identifier: name.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Ledgerbook operations
pub type LedgerResult<T> = Result<T, LedgerError>;
