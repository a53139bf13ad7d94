//! CLI command tests

use super::*;
use crate::config::{
    parse_args, EvaluateArgs, FinalizeArgs, RunsArgs, RunsCommand, SelectBestArgs,
    StudyReportArgs, OutputFormat,
};
use crate::eval::KappaVariant;
use crate::storage::{ModelOutputs, RankingMetric};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn config_in(dir: &Path) -> EvalConfig {
    EvalConfig {
        num_classes: 3,
        store: dir.join("results.db"),
        kappa_variant: KappaVariant::QuadraticWeighted,
        outputs: ModelOutputs::in_dir(dir),
    }
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn evaluate_args(dir: &Path, fold: usize, preds: &str) -> EvaluateArgs {
    EvaluateArgs {
        labels: write(dir, &format!("y_{fold}.txt"), "0 1 2 2\n"),
        predictions: write(dir, &format!("p_{fold}.txt"), preds),
        model: write(dir, &format!("model_{fold}.txt"), &format!("model {fold}"))
            .to_string_lossy()
            .into_owned(),
        model_config: write(dir, "xgb.yaml", "max_depth: 6\n").to_string_lossy().into_owned(),
        num_classes: None,
        kappa: None,
        export_csv: None,
        report: false,
    }
}

#[test]
fn test_evaluate_records_run_and_predictions() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());

    let args = evaluate_args(dir.path(), 1, "0\n1\n2\n1\n");
    evaluate::run_evaluate(args, &config, LogLevel::Quiet).unwrap();

    let store = config.store();
    let runs = store.list_runs().unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].config_text, "max_depth: 6\n");
    assert_eq!(store.prediction_count(runs[0].id).unwrap(), 4);
}

#[test]
fn test_evaluate_accepts_probability_rows() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());

    let preds = "0.8 0.1 0.1\n0.1 0.8 0.1\n0.1 0.1 0.8\n0.1 0.1 0.8\n";
    let mut args = evaluate_args(dir.path(), 1, preds);
    let csv = dir.path().join("pred.csv");
    args.export_csv = Some(csv.clone());
    evaluate::run_evaluate(args, &config, LogLevel::Quiet).unwrap();

    let run = &config.store().list_runs().unwrap()[0];
    assert!((run.metrics.accuracy - 1.0).abs() < 1e-12);
    assert!(fs::read_to_string(csv).unwrap().starts_with("index,y_true,y_pred\n"));
}

#[test]
fn test_evaluate_rejects_length_mismatch() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());

    let args = evaluate_args(dir.path(), 1, "0\n1\n");
    let err = evaluate::run_evaluate(args, &config, LogLevel::Quiet).unwrap_err();
    assert!(err.contains("mismatch"));
    assert!(config.store().list_runs().unwrap().is_empty());
}

#[test]
fn test_evaluate_rejects_out_of_range_label() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());

    let args = evaluate_args(dir.path(), 1, "0\n1\n2\n3\n");
    let err = evaluate::run_evaluate(args, &config, LogLevel::Quiet).unwrap_err();
    assert!(err.contains("out of range"));
}

#[test]
fn test_select_best_and_finalize() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());

    evaluate::run_evaluate(evaluate_args(dir.path(), 1, "0\n0\n0\n0\n"), &config, LogLevel::Quiet)
        .unwrap();
    evaluate::run_evaluate(evaluate_args(dir.path(), 2, "0\n1\n2\n2\n"), &config, LogLevel::Quiet)
        .unwrap();

    select::run_select_best(SelectBestArgs { metric: None }, &config, LogLevel::Quiet).unwrap();
    assert_eq!(fs::read_to_string(&config.outputs.best_f1_model).unwrap(), "model 2");
    assert_eq!(fs::read_to_string(&config.outputs.best_kappa_model).unwrap(), "model 2");

    let store = config.store();
    assert_eq!(store.best_pointer(RankingMetric::MacroF1).unwrap().unwrap().run_id, 2);

    let full = write(dir.path(), "model_full.txt", "full model");
    finalize::run_finalize(
        FinalizeArgs {
            model: full.to_string_lossy().into_owned(),
            model_config: "xgb.yaml".to_string(),
        },
        &config,
        LogLevel::Quiet,
    )
    .unwrap();
    assert_eq!(fs::read_to_string(&config.outputs.final_model).unwrap(), "full model");
}

#[test]
fn test_select_best_without_runs_is_ok() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    select::run_select_best(
        SelectBestArgs { metric: Some(RankingMetric::Kappa) },
        &config,
        LogLevel::Quiet,
    )
    .unwrap();
    assert!(!config.outputs.best_kappa_model.exists());
}

#[test]
fn test_runs_show_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let args = RunsArgs {
        command: RunsCommand::Show { id: 42, format: OutputFormat::Text, predictions: false },
    };
    let err = runs::run_runs(args, &config, LogLevel::Quiet).unwrap_err();
    assert!(err.contains("42"));
}

#[test]
fn test_runs_list_empty_store_at_any_level() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    for level in [LogLevel::Quiet, LogLevel::Normal] {
        let list = RunsArgs { command: RunsCommand::List { format: OutputFormat::Text } };
        runs::run_runs(list, &config, level).unwrap();
    }
}

#[test]
fn test_runs_list_and_show() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    evaluate::run_evaluate(evaluate_args(dir.path(), 1, "0\n1\n2\n2\n"), &config, LogLevel::Quiet)
        .unwrap();

    let list = RunsArgs { command: RunsCommand::List { format: OutputFormat::Json } };
    runs::run_runs(list, &config, LogLevel::Quiet).unwrap();

    let show = RunsArgs {
        command: RunsCommand::Show { id: 1, format: OutputFormat::Json, predictions: true },
    };
    runs::run_runs(show, &config, LogLevel::Quiet).unwrap();
}

#[test]
fn test_study_report_missing_source() {
    let dir = TempDir::new().unwrap();
    let args = StudyReportArgs {
        source: dir.path().join("absent.db"),
        out_dir: dir.path().join("reports"),
    };
    let err = study_report::run_study_report(args, LogLevel::Quiet).unwrap_err();
    assert!(err.contains("not found"));
}

#[test]
fn test_run_command_uses_config_file() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("cv.db");
    let config_path = write(
        dir.path(),
        "foldscore.yaml",
        &format!("num_classes: 3\nstore: {}\n", store.display()),
    );

    let cli = parse_args([
        "foldscore",
        "--quiet",
        "--config",
        config_path.to_str().unwrap(),
        "runs",
        "list",
    ])
    .unwrap();
    run_command(cli).unwrap();
    assert!(store.exists());
}

#[test]
fn test_check_labels() {
    assert!(evaluate::check_labels(&[0, 1], &[1, 0], 2).is_ok());
    assert!(evaluate::check_labels(&[0, 1], &[1], 2).is_err());
    assert!(evaluate::check_labels(&[0, 2], &[1, 0], 2).is_err());
}
