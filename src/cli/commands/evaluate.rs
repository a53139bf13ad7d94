//! Evaluate command: score one run and record it

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{EvalConfig, EvaluateArgs};
use crate::eval::{classification_report, RunMetrics};
use crate::io::{read_config_text, read_labels, read_predicted_classes, write_predictions_csv};

pub fn run_evaluate(args: EvaluateArgs, config: &EvalConfig, level: LogLevel) -> Result<(), String> {
    let n_classes = args.num_classes.unwrap_or(config.num_classes);
    if n_classes == 0 {
        return Err("Number of classes must be at least 1".to_string());
    }
    let variant = args.kappa.unwrap_or(config.kappa_variant);

    let y_true = read_labels(&args.labels).map_err(|e| format!("Labels error: {e}"))?;
    let y_pred =
        read_predicted_classes(&args.predictions).map_err(|e| format!("Predictions error: {e}"))?;
    check_labels(&y_true, &y_pred, n_classes)?;

    let config_text =
        read_config_text(&args.model_config).map_err(|e| format!("Model config error: {e}"))?;

    let metrics = RunMetrics::compute(&y_true, &y_pred, n_classes, variant);

    let store = config.store();
    let run_id = store
        .record_run(&metrics, &args.model, &args.model_config, &config_text)
        .map_err(|e| format!("Failed to record run: {e}"))?;
    let batch = store
        .record_predictions(run_id, &y_true, &y_pred)
        .map_err(|e| format!("Failed to record predictions: {e}"))?;
    if !batch.is_complete() {
        eprintln!(
            "Warning: {} of {} predictions for run {run_id} were not stored",
            batch.failed,
            y_true.len()
        );
    }

    if let Some(csv) = &args.export_csv {
        write_predictions_csv(csv, &y_true, &y_pred).map_err(|e| format!("Export error: {e}"))?;
        log(level, LogLevel::Verbose, &format!("Predictions written to {}", csv.display()));
    }

    log(level, LogLevel::Normal, &format!("Run {run_id} recorded ({} observations)", y_true.len()));
    log(level, LogLevel::Normal, &format!("  Accuracy: {:.4}", metrics.accuracy));
    log(level, LogLevel::Normal, &format!("  Macro F1: {:.4}", metrics.macro_f1));
    log(
        level,
        LogLevel::Normal,
        &format!("  Kappa ({}): {:.4}", metrics.kappa_variant, metrics.kappa()),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Cohen kappa: {:.4}  Quadratic weighted kappa: {:.4}",
            metrics.cohen_kappa, metrics.quadratic_weighted_kappa
        ),
    );

    if args.report && level != LogLevel::Quiet {
        println!();
        print!("{}", classification_report(&y_true, &y_pred, n_classes));
    }

    Ok(())
}

/// Reject inputs the scoring functions treat as caller bugs
pub(super) fn check_labels(y_true: &[usize], y_pred: &[usize], n_classes: usize) -> Result<(), String> {
    if y_true.len() != y_pred.len() {
        return Err(format!(
            "Label count mismatch: {} true labels, {} predictions",
            y_true.len(),
            y_pred.len()
        ));
    }
    if let Some(bad) = y_true.iter().chain(y_pred).find(|&&l| l >= n_classes) {
        return Err(format!("Label {bad} out of range for {n_classes} classes"));
    }
    Ok(())
}
