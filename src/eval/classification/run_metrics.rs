//! Per-run metric bundle persisted by the results store

use serde::{Deserialize, Serialize};

use super::kappa::{cohen_kappa, quadratic_weighted_kappa};
use super::report::{accuracy, macro_f1};

/// Which kappa statistic is designated as "the" kappa of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KappaVariant {
    /// Unweighted Cohen's kappa
    Cohen,
    /// Quadratic-weighted kappa for ordinal targets
    #[default]
    QuadraticWeighted,
}

impl KappaVariant {
    /// Stable name used in the store and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            KappaVariant::Cohen => "cohen",
            KappaVariant::QuadraticWeighted => "quadratic_weighted",
        }
    }
}

impl std::str::FromStr for KappaVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "cohen" => Ok(KappaVariant::Cohen),
            "quadratic_weighted" | "qwk" | "quadratic" => Ok(KappaVariant::QuadraticWeighted),
            _ => Err(format!(
                "Unknown kappa variant: {s}. Valid variants: cohen, quadratic_weighted"
            )),
        }
    }
}

impl std::fmt::Display for KappaVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scores of one evaluated run
///
/// Both kappa statistics are always computed; `kappa_variant` records which
/// one the store ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub accuracy: f64,
    pub macro_f1: f64,
    pub cohen_kappa: f64,
    pub quadratic_weighted_kappa: f64,
    pub kappa_variant: KappaVariant,
}

impl RunMetrics {
    /// Score one (truth, prediction) pair.
    ///
    /// # Panics
    ///
    /// Panics on length mismatch or out-of-range labels, like
    /// [`accuracy`] and [`macro_f1`].
    pub fn compute(
        y_true: &[usize],
        y_pred: &[usize],
        n_classes: usize,
        kappa_variant: KappaVariant,
    ) -> Self {
        Self {
            accuracy: accuracy(y_true, y_pred),
            macro_f1: macro_f1(y_true, y_pred, n_classes),
            cohen_kappa: cohen_kappa(y_true, y_pred, n_classes),
            quadratic_weighted_kappa: quadratic_weighted_kappa(y_true, y_pred, n_classes),
            kappa_variant,
        }
    }

    /// The designated kappa value
    pub fn kappa(&self) -> f64 {
        match self.kappa_variant {
            KappaVariant::Cohen => self.cohen_kappa,
            KappaVariant::QuadraticWeighted => self.quadratic_weighted_kappa,
        }
    }
}

/// Mean scores across folds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MetricsSummary {
    pub runs: usize,
    pub accuracy: f64,
    pub macro_f1: f64,
    pub kappa: f64,
}

impl MetricsSummary {
    /// Arithmetic mean of each metric; all zeros for an empty slice.
    pub fn mean(runs: &[RunMetrics]) -> Self {
        if runs.is_empty() {
            return Self::default();
        }
        let n = runs.len() as f64;
        Self {
            runs: runs.len(),
            accuracy: runs.iter().map(|m| m.accuracy).sum::<f64>() / n,
            macro_f1: runs.iter().map(|m| m.macro_f1).sum::<f64>() / n,
            kappa: runs.iter().map(RunMetrics::kappa).sum::<f64>() / n,
        }
    }
}
