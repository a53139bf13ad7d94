//! Study report error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors while reading a trial log or writing study reports
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Trial log not found: {0}")]
    SourceMissing(PathBuf),

    #[error("Trial log unavailable at {path}: {reason}")]
    Unavailable { path: PathBuf, reason: String },

    #[error("Trial log query failed: {0}")]
    Query(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<rusqlite::Error> for ReportError {
    fn from(e: rusqlite::Error) -> Self {
        ReportError::Query(e.to_string())
    }
}

/// Result type for study report operations
pub type Result<T> = std::result::Result<T, ReportError>;
