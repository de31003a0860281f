use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors produced by the analytics pipeline.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// A source CSV file could not be opened, read or decoded.
    #[error("Failed to read source file {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A report file could not be created or written.
    #[error("Failed to write report {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The run summary could not be serialized.
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the analytics crates.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Why a raw CSV row was dropped during ingestion.
///
/// Rejections are never fatal; they only feed logging and drop counters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowRejection {
    #[error("expected {expected} fields, found {found}")]
    WrongArity { expected: usize, found: usize },

    #[error("field {index} is empty")]
    EmptyField { index: usize },

    #[error("column {column} is not an integer: {value:?}")]
    NotNumeric { column: &'static str, value: String },
}
