/// Error types for loading water-quality datasets
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dataset loading and export
#[derive(Error, Debug)]
pub enum BwqError {
    /// The dataset file does not exist
    #[error("Data file not found: {0}")]
    SourceNotFound(PathBuf),

    /// Reading the dataset file failed
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse or write CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A column the dataset cannot do without is absent
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Timestamp or date parsing failed
    #[error("Failed to parse timestamp: {0}")]
    TimestampParse(String),
}

/// Type alias for Results using BwqError
pub type Result<T> = std::result::Result<T, BwqError>;
