//! Model evaluation
//!
//! Scoring functions applied to the (truth, prediction) label sequences of
//! each cross-validation fold, holdout or final run. Everything here is pure:
//! no I/O and no shared state.
//!
//! ## Example
//!
//! ```
//! use foldscore::eval::{accuracy, macro_f1, quadratic_weighted_kappa};
//!
//! let y_true = [0, 1, 2, 2, 1];
//! let y_pred = [0, 1, 1, 2, 1];
//!
//! assert!((accuracy(&y_true, &y_pred) - 0.8).abs() < 1e-12);
//! assert!(macro_f1(&y_true, &y_pred, 3) > 0.8);
//! assert!((quadratic_weighted_kappa(&y_true, &y_pred, 3) - 0.8).abs() < 1e-12);
//! ```

pub mod classification;

pub use classification::{
    accuracy, classification_report, cohen_kappa, confusion_matrix, macro_f1,
    quadratic_weighted_kappa, Average, ClassScore, ConfusionMatrix, KappaVariant, MetricsSummary,
    MultiClassMetrics, RunMetrics,
};
