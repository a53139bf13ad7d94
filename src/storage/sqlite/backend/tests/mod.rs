//! Tests for the SQLite results store.

mod run_tests;

use crate::eval::{KappaVariant, RunMetrics};
use crate::storage::{ModelOutputs, ResultsStore};
use std::path::Path;

/// Store file and model outputs inside `dir`
pub(super) fn store_in(dir: &Path) -> ResultsStore {
    ResultsStore::new(dir.join("results.db"), ModelOutputs::in_dir(dir))
}

pub(super) fn metrics(macro_f1: f64, kappa: f64) -> RunMetrics {
    RunMetrics {
        accuracy: 0.5,
        macro_f1,
        cohen_kappa: kappa / 2.0,
        quadratic_weighted_kappa: kappa,
        kappa_variant: KappaVariant::QuadraticWeighted,
    }
}

/// Write a model file with recognisable content and return its path
pub(super) fn model_file(dir: &Path, name: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, format!("tree model {name}")).expect("write model file");
    path.to_string_lossy().into_owned()
}
