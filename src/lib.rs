//! Foldscore: scoring and model selection for cross-validated classifiers
//!
//! - [`eval`]: accuracy, macro F1, Cohen and quadratic-weighted kappa
//! - [`storage`]: SQLite results store with best-model and final-model pointers
//! - [`optim::hpo`]: best-trial reports over a hyperparameter study log
//! - [`io`]: label, prediction and configuration file readers
//! - [`config`]: YAML settings and the command-line definition
//! - [`cli`]: command handlers behind the `foldscore` binary
//!
//! # Example
//!
//! ```no_run
//! use foldscore::eval::{KappaVariant, RunMetrics};
//! use foldscore::storage::{ModelOutputs, RankingMetric, ResultsStore};
//!
//! let y_true = vec![0, 1, 2, 2, 4];
//! let y_pred = vec![0, 1, 2, 3, 4];
//! let metrics = RunMetrics::compute(&y_true, &y_pred, 5, KappaVariant::QuadraticWeighted);
//!
//! let store = ResultsStore::new("results.db", ModelOutputs::default());
//! let run_id = store.record_run(&metrics, "model_fold1.txt", "xgb.yaml", "max_depth: 6\n")?;
//! store.record_predictions(run_id, &y_true, &y_pred)?;
//! store.select_best_by_metric(RankingMetric::Kappa)?;
//! # Ok::<(), foldscore::storage::StorageError>(())
//! ```

pub mod cli;
pub mod config;
pub mod eval;
pub mod io;
pub mod optim;
pub mod storage;
