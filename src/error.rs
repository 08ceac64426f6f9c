//! Error types for loading and transforming datasets.

use std::path::PathBuf;

use thiserror::Error;

/// Every failure a load or a pipeline stage can produce.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("File {} not found", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read file '{}': {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File {} is empty or contains only headers", .path.display())]
    EmptyFile { path: PathBuf },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed expression '{expr}': {reason}")]
    Parse { expr: String, reason: String },

    #[error("Column '{0}' not found in data")]
    ColumnNotFound(String),

    #[error("Only = is supported for text column '{column}' (got '{op}')")]
    UnsupportedOperator { column: String, op: char },

    #[error("Value '{value}' in column '{column}' is not numeric")]
    Conversion { column: String, value: String },

    #[error("Aggregation must be avg, min, max or median (got '{0}')")]
    UnknownAggregateType(String),

    #[error("Sort order must be asc or desc (got '{0}')")]
    UnknownSortOrder(String),

    #[error("Delimiter must be a single ASCII character (got '{0}')")]
    InvalidDelimiter(char),
}

impl PipelineError {
    pub(crate) fn parse(expr: &str, reason: impl Into<String>) -> Self {
        PipelineError::Parse {
            expr: expr.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
