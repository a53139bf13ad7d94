//! Finalize command

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{EvalConfig, FinalizeArgs};

pub fn run_finalize(args: FinalizeArgs, config: &EvalConfig, level: LogLevel) -> Result<(), String> {
    let pointer = config
        .store()
        .set_final_model(&args.model, &args.model_config)
        .map_err(|e| format!("Failed to set final model: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!("Final model: {} -> {}", pointer.model_path, pointer.output_path.display()),
    );
    Ok(())
}
