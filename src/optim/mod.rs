//! Hyperparameter optimization support
//!
//! - `hpo`: read-only reporting over an external hyperparameter-search trial log

pub mod hpo;

pub use hpo::{generate_report, Direction, ReportError, ReportSummary, SqliteStudyLog, StudyLog};
