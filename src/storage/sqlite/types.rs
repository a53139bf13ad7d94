//! Type definitions for the SQLite results store.
//!
//! Contains persisted run records, prediction rows and the best/final model
//! pointers.

use crate::eval::RunMetrics;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Store-assigned run identifier (monotonically increasing, never reused)
pub type RunId = i64;

/// One persisted evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Run {
    pub id: RunId,
    pub created_at: DateTime<Utc>,
    pub metrics: RunMetrics,
    pub model_path: String,
    pub config_path: String,
    /// Configuration text as it was when the run was recorded
    pub config_text: String,
}

/// One observation of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PredictionRecord {
    pub run_id: RunId,
    pub index: usize,
    pub y_true: usize,
    pub y_pred: usize,
}

/// Outcome of a best-effort bulk prediction insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PredictionBatch {
    pub inserted: usize,
    pub failed: usize,
}

impl PredictionBatch {
    /// True when every row landed
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Criterion a best-model pointer is ranked by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMetric {
    MacroF1,
    Kappa,
}

impl RankingMetric {
    pub const ALL: [RankingMetric; 2] = [RankingMetric::MacroF1, RankingMetric::Kappa];

    /// Key of the singleton row in `best_models`
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingMetric::MacroF1 => "macro_f1",
            RankingMetric::Kappa => "kappa",
        }
    }

    /// Column of `runs` the criterion ranks on
    pub(crate) fn column(&self) -> &'static str {
        match self {
            RankingMetric::MacroF1 => "macro_f1",
            RankingMetric::Kappa => "kappa",
        }
    }
}

impl std::str::FromStr for RankingMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "macro_f1" | "f1" => Ok(RankingMetric::MacroF1),
            "kappa" => Ok(RankingMetric::Kappa),
            _ => Err(format!("Unknown ranking metric: {s}. Valid metrics: macro_f1, kappa")),
        }
    }
}

impl std::fmt::Display for RankingMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run currently judged best under one criterion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestPointer {
    pub metric: RankingMetric,
    pub run_id: RunId,
    /// Model path copied from the run at selection time
    pub model_path: String,
    /// Where the model was copied to
    pub output_path: PathBuf,
    pub selected_at: DateTime<Utc>,
}

/// Model trained on the complete dataset, designated for production use
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalModelPointer {
    pub model_path: String,
    pub config_path: String,
    pub output_path: PathBuf,
    pub is_final: bool,
    pub assigned_at: DateTime<Utc>,
}

/// Fixed, well-known locations selected models are copied to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelOutputs {
    pub best_f1_model: PathBuf,
    pub best_kappa_model: PathBuf,
    pub final_model: PathBuf,
}

impl Default for ModelOutputs {
    fn default() -> Self {
        Self {
            best_f1_model: PathBuf::from("best_model.txt"),
            best_kappa_model: PathBuf::from("best_model_kappa.txt"),
            final_model: PathBuf::from("final_model.txt"),
        }
    }
}

impl ModelOutputs {
    /// Place every output file inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        let defaults = Self::default();
        Self {
            best_f1_model: dir.join(defaults.best_f1_model),
            best_kappa_model: dir.join(defaults.best_kappa_model),
            final_model: dir.join(defaults.final_model),
        }
    }

    /// Output location for a ranking criterion
    pub fn for_metric(&self, metric: RankingMetric) -> &Path {
        match metric {
            RankingMetric::MacroF1 => &self.best_f1_model,
            RankingMetric::Kappa => &self.best_kappa_model,
        }
    }
}
