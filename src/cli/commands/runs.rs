//! Run inspection commands.
//!
//! List and show runs recorded in the results store.

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{EvalConfig, OutputFormat, RunsArgs, RunsCommand};
use crate::eval::{MetricsSummary, RunMetrics};
use crate::storage::{ResultsStore, RunId};
use serde::Serialize;

pub fn run_runs(args: RunsArgs, config: &EvalConfig, level: LogLevel) -> Result<(), String> {
    let store = config.store();

    match args.command {
        RunsCommand::List { format } => list_runs(&store, format, level),
        RunsCommand::Show { id, format, predictions } => {
            show_run(&store, id, format, predictions)
        }
    }
}

#[derive(Serialize)]
struct RunListing<'a> {
    runs: &'a [crate::storage::Run],
    mean: MetricsSummary,
}

fn list_runs(store: &ResultsStore, format: OutputFormat, level: LogLevel) -> Result<(), String> {
    let runs = store.list_runs().map_err(|e| format!("Failed to list runs: {e}"))?;
    let metrics: Vec<RunMetrics> = runs.iter().map(|r| r.metrics).collect();
    let mean = MetricsSummary::mean(&metrics);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&RunListing { runs: &runs, mean })
                .map_err(|e| format!("JSON serialization failed: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Text => {
            if runs.is_empty() {
                log(
                    level,
                    LogLevel::Normal,
                    &format!("No runs recorded in {}", store.path().display()),
                );
                return Ok(());
            }
            println!(
                "{:<6} {:<20} {:>9} {:>9} {:>9}  {}",
                "ID", "CREATED", "ACCURACY", "MACRO_F1", "KAPPA", "MODEL"
            );
            println!("{}", "-".repeat(80));
            for run in &runs {
                println!(
                    "{:<6} {:<20} {:>9.4} {:>9.4} {:>9.4}  {}",
                    run.id,
                    run.created_at.format("%Y-%m-%d %H:%M:%S"),
                    run.metrics.accuracy,
                    run.metrics.macro_f1,
                    run.metrics.kappa(),
                    run.model_path,
                );
            }
            println!("{}", "-".repeat(80));
            println!(
                "{:<6} {:<20} {:>9.4} {:>9.4} {:>9.4}",
                "MEAN", "", mean.accuracy, mean.macro_f1, mean.kappa
            );
            println!("\n{} run(s)", runs.len());
        }
    }

    Ok(())
}

fn show_run(
    store: &ResultsStore,
    id: RunId,
    format: OutputFormat,
    with_predictions: bool,
) -> Result<(), String> {
    let run = store.get_run(id).map_err(|e| format!("Failed to get run: {e}"))?;
    let predictions = if with_predictions {
        store.predictions(id).map_err(|e| format!("Failed to read predictions: {e}"))?
    } else {
        Vec::new()
    };
    let stored = store.prediction_count(id).map_err(|e| format!("Failed to count predictions: {e}"))?;

    match format {
        OutputFormat::Json => {
            let mut value =
                serde_json::to_value(&run).map_err(|e| format!("JSON serialization failed: {e}"))?;
            value["prediction_count"] = stored.into();
            if with_predictions {
                value["predictions"] = serde_json::to_value(&predictions)
                    .map_err(|e| format!("JSON serialization failed: {e}"))?;
            }
            let json = serde_json::to_string_pretty(&value)
                .map_err(|e| format!("JSON serialization failed: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Text => {
            println!("Run: {}", run.id);
            println!("  Created:     {}", run.created_at.format("%Y-%m-%d %H:%M:%S"));
            println!("  Model:       {}", run.model_path);
            println!("  Config:      {}", run.config_path);
            println!("  Accuracy:    {:.4}", run.metrics.accuracy);
            println!("  Macro F1:    {:.4}", run.metrics.macro_f1);
            println!("  Kappa:       {:.4} ({})", run.metrics.kappa(), run.metrics.kappa_variant);
            println!("  Cohen kappa: {:.4}", run.metrics.cohen_kappa);
            println!("  QWK:         {:.4}", run.metrics.quadratic_weighted_kappa);
            println!("  Predictions: {stored}");
            if with_predictions {
                println!();
                println!("{:<8} {:>6} {:>6}", "INDEX", "TRUE", "PRED");
                for p in &predictions {
                    println!("{:<8} {:>6} {:>6}", p.index, p.y_true, p.y_pred);
                }
            }
        }
    }

    Ok(())
}
