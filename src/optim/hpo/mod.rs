//! Hyperparameter study reporting
//!
//! Reads a trial log in the Optuna RDB layout and, per study, derives the
//! best completed trial according to the study's direction.
//!
//! Three artifacts are written per study into the output directory:
//!
//! - `study_history_<name>.csv`: every trial ordered by number
//! - `study_best_params_<name>.json`: best trial and its parameters
//! - `study_curve_best_<name>.csv`: intermediate values of the best trial,
//!   only when the log records them
//!
//! # Example
//!
//! ```no_run
//! use foldscore::optim::hpo::generate_report;
//!
//! let summary = generate_report("optuna_study.db", "reports").unwrap();
//! if !summary.any_best_trial() {
//!     eprintln!("no study has a completed trial yet");
//! }
//! ```

mod error;
mod report;
mod study_log;
mod types;

pub use error::{ReportError, Result};
pub use report::{generate_report, ReportSummary, StudyOutcome, StudyReporter};
pub use study_log::{SqliteStudyLog, StudyLog};
pub use types::{
    BestTrial, Direction, StudyRecord, TrialIntermediate, TrialParam, TrialRecord, TrialState,
};
