//! SQLite results store
//!
//! Local, file-backed storage of evaluated runs, their per-observation
//! predictions and the best/final model pointers. Every operation opens its
//! own connection and releases it before returning, so the store tolerates
//! other processes touching the same file between calls.
//!
//! # Example
//!
//! ```ignore
//! use foldscore::eval::{KappaVariant, RunMetrics};
//! use foldscore::storage::{ModelOutputs, RankingMetric, ResultsStore};
//!
//! let store = ResultsStore::new("results.db", ModelOutputs::default());
//! let metrics = RunMetrics::compute(&y_true, &y_pred, 5, KappaVariant::QuadraticWeighted);
//! let run_id = store.record_run(&metrics, "model_fold_0.txt", "config_fold_0.txt", &config_text)?;
//! store.record_predictions(run_id, &y_true, &y_pred)?;
//! store.select_best_by_metric(RankingMetric::MacroF1)?;
//! ```

mod backend;
mod runs;
mod selection;
mod types;

pub use backend::{table_exists, ResultsStore};
pub(crate) use backend::table_exists_in;
pub use types::{
    BestPointer, FinalModelPointer, ModelOutputs, PredictionBatch, PredictionRecord,
    RankingMetric, Run, RunId,
};
