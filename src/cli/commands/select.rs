//! Select-best command

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{EvalConfig, SelectBestArgs};
use crate::storage::RankingMetric;

pub fn run_select_best(
    args: SelectBestArgs,
    config: &EvalConfig,
    level: LogLevel,
) -> Result<(), String> {
    let store = config.store();
    let metrics = match args.metric {
        Some(metric) => vec![metric],
        None => RankingMetric::ALL.to_vec(),
    };

    for metric in metrics {
        let pointer = store
            .select_best_by_metric(metric)
            .map_err(|e| format!("Failed to select best model by {metric}: {e}"))?;
        match pointer {
            Some(p) => log(
                level,
                LogLevel::Normal,
                &format!(
                    "Best by {metric}: run {} ({}) -> {}",
                    p.run_id,
                    p.model_path,
                    p.output_path.display()
                ),
            ),
            None => log(level, LogLevel::Normal, &format!("Best by {metric}: no runs recorded")),
        }
    }

    Ok(())
}
