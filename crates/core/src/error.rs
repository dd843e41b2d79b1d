//! Error types for sheetsift.

use sheetsift_sheet::SheetError;
use thiserror::Error;

/// Result type for engine operations.
pub type SiftResult<T> = Result<T, SiftError>;

/// Errors that can occur in the engine.
///
/// Every variant is recoverable: the table stays usable after any failed
/// operation.
#[derive(Debug, Error)]
pub enum SiftError {
    /// Find & replace was invoked without anything to find.
    #[error("Please enter text to find")]
    EmptyFindText,

    /// An operation that needs a target column got none.
    #[error("Please select a column first")]
    NoColumnSelected,

    /// A named column does not exist in the table.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// A numeric aggregation found no numeric values.
    #[error("Column '{0}' must contain numeric values for a histogram")]
    NotNumeric(String),

    /// A search or replace pattern did not compile.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Persisted state could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Table model or file format error.
    #[error(transparent)]
    Sheet(#[from] SheetError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SiftError {
    /// Create an invalid-pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Map a sheet lookup failure for a missing column onto `ColumnNotFound`.
    pub(crate) fn from_sheet_lookup(err: SheetError) -> Self {
        match err {
            SheetError::ColumnNotFound { name } => Self::ColumnNotFound(name),
            other => Self::Sheet(other),
        }
    }
}
