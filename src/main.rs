//! Foldscore CLI
//!
//! # Usage
//!
//! ```bash
//! # Score a fold and record it
//! foldscore evaluate --labels y_fold1.txt --predictions pred_fold1.txt \
//!     --model model_fold1.txt --model-config xgb.yaml
//!
//! # Inspect recorded runs
//! foldscore runs list
//!
//! # Copy the best models by macro F1 and kappa
//! foldscore select-best
//!
//! # Designate the production model
//! foldscore finalize --model model_full.txt --model-config xgb.yaml
//!
//! # Summarize a hyperparameter study
//! foldscore study-report optuna_study.db --out-dir reports
//! ```

use clap::Parser;
use foldscore::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
