//! Error types for the gene-expression-stats library.

use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum ExpressionError {
    #[error("{0} doesn't exist in the gene catalog")]
    UnknownGene(String),

    #[error("Gene {gene} has {count} observation(s); at least 2 are required for a standard deviation")]
    InsufficientSamples { gene: String, count: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Unknown status label '{label}' at line {line}")]
    UnknownStatus { line: usize, label: String },

    #[error("Gene {0} appears more than once in the header")]
    DuplicateGene(String),

    #[error("Empty data: {0}")]
    EmptyData(String),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, ExpressionError>;
