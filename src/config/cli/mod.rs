//! Command-line definition
//!
//! # Usage
//!
//! ```bash
//! foldscore evaluate --labels y_fold1.txt --predictions pred_fold1.txt \
//!     --model model_fold1.txt --model-config xgb.yaml
//! foldscore runs list
//! foldscore runs show 3 --format json
//! foldscore select-best
//! foldscore finalize --model model_full.txt --model-config xgb.yaml
//! foldscore study-report optuna_study.db --out-dir reports
//! ```

mod core;
mod types;

pub use self::core::{
    parse_args, Cli, Command, EvaluateArgs, FinalizeArgs, RunsArgs, RunsCommand, SelectBestArgs,
    StudyReportArgs,
};
pub use types::OutputFormat;
