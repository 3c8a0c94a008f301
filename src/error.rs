//! Error types for ingot
//!
//! Structural problems (empty input, bad options, malformed records) are
//! reported here. Per-value anomalies such as unparsable dates never become
//! errors; the emitter logs them and falls back to `NULL` or a coerced literal.

use thiserror::Error;

/// The main error type for ingot
#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot infer a schema from zero records")]
    EmptyInput,

    #[error("No typeable fields left for table '{table}'")]
    NoTypeableFields { table: String },

    #[error("Cannot render an INSERT for table '{table}' without records")]
    EmptyInsert { table: String },

    #[error("Invalid option '{field}': {message}")]
    InvalidOption { field: String, message: String },

    #[error("Invalid record: {message}")]
    InvalidRecord { message: String },

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid option error
    pub fn invalid_option(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid record error
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }

    pub fn no_typeable_fields(table: impl Into<String>) -> Self {
        Self::NoTypeableFields {
            table: table.into(),
        }
    }
}

/// Result type alias for ingot
pub type Result<T> = std::result::Result<T, Error>;
