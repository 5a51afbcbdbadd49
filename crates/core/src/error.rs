//! Error types for rowstore
//!
//! A single `thiserror` enum covers every layer. Absence is normally
//! reported as `Ok(None)` or an empty list; the `*NotFound` variants are
//! for call sites that require presence.

use crate::column::ColumnRef;
use std::io;
use thiserror::Error;

/// Result type alias for rowstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for rowstore
#[derive(Debug, Error)]
pub enum Error {
    /// Row key has no cells
    #[error("Row not found: {row_key}")]
    RowNotFound {
        /// Requested row key
        row_key: String,
    },

    /// Row exists but the column has no cells
    #[error("Column {column} not found in row {row_key}")]
    ColumnNotFound {
        /// Requested row key
        row_key: String,
        /// Requested column
        column: ColumnRef,
    },

    /// Value could not be interpreted as the requested type
    #[error("Malformed value {value:?}: {reason}")]
    MalformedValue {
        /// Raw cell contents
        value: String,
        /// Parser message
        reason: String,
    },

    /// Caller supplied an invalid key, name, limit, or mutation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Persisted data could not be understood
    #[error("Data corruption: {0}")]
    Corruption(String),

    /// Configuration could not be read or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Build an `InvalidInput` error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Build a `RowNotFound` error
    pub fn row_not_found(row_key: impl Into<String>) -> Self {
        Error::RowNotFound {
            row_key: row_key.into(),
        }
    }

    /// True for `RowNotFound` and `ColumnNotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::RowNotFound { .. } | Error::ColumnNotFound { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
