//! Classification metrics for model evaluation
//!
//! Provides multi-class classification metrics including:
//! - Confusion matrix computation
//! - Per-class precision, recall, F1 with macro and weighted averaging
//! - Cohen's kappa and quadratic-weighted kappa
//! - sklearn-style classification reports
//!
//! Every scalar metric is defined on degenerate input: empty sequences score
//! `0.0` instead of producing `NaN`.

mod confusion;
mod kappa;
mod metrics;
mod report;
mod run_metrics;

#[cfg(test)]
mod tests;

pub use confusion::ConfusionMatrix;
pub use kappa::{cohen_kappa, quadratic_weighted_kappa};
pub use metrics::{Average, ClassScore, MultiClassMetrics};
pub use report::{accuracy, classification_report, confusion_matrix, macro_f1};
pub use run_metrics::{KappaVariant, MetricsSummary, RunMetrics};
