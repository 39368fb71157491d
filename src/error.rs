//! Error types for the taxcompare library.

use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed input at row {row}: {reason}")]
    MalformedInput { row: usize, reason: String },

    #[error("Missing column '{0}' in profile table")]
    MissingColumn(String),

    #[error("Cannot build a comparison matrix over an empty taxon set")]
    EmptyTaxonSet,

    #[error("Agreement is undefined for a table with no tools")]
    NoTools,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, CompareError>;
