//! Durable results storage
//!
//! - `sqlite`: the results store (runs, predictions, best-model and
//!   final-model pointers) backed by a local SQLite file

pub mod sqlite;

use std::path::PathBuf;

pub use sqlite::{
    table_exists, BestPointer, FinalModelPointer, ModelOutputs, PredictionBatch,
    PredictionRecord, RankingMetric, ResultsStore, Run, RunId,
};

/// Errors from results-store operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The store file could not be opened or created
    #[error("Results store unavailable at {path}: {reason}")]
    Unavailable { path: PathBuf, reason: String },

    /// A statement failed against an open store
    #[error("Query failed: {0}")]
    Query(String),

    #[error("Run not found: {0}")]
    RunNotFound(RunId),

    #[error("Label sequences differ in length: {y_true} true vs {y_pred} predicted")]
    LengthMismatch { y_true: usize, y_pred: usize },

    #[error("Failed to copy model {from} to {to}: {source}")]
    ArtifactCopy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::Query(e.to_string())
    }
}

/// Result alias for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;
