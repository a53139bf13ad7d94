//! Study-report command

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::StudyReportArgs;
use crate::optim::hpo::generate_report;

pub fn run_study_report(args: StudyReportArgs, level: LogLevel) -> Result<(), String> {
    let summary = generate_report(&args.source, &args.out_dir)
        .map_err(|e| format!("Study report failed: {e}"))?;

    if summary.is_empty() {
        log(level, LogLevel::Normal, "No studies found");
    }
    for outcome in &summary.outcomes {
        let line = match &outcome.best {
            Some(best) => format!(
                "{} ({}): best trial #{} = {}",
                outcome.study.name, outcome.direction, best.number, best.value
            ),
            None => format!("{} ({}): no completed trial", outcome.study.name, outcome.direction),
        };
        log(level, LogLevel::Normal, &line);
        for artifact in &outcome.artifacts {
            log(level, LogLevel::Verbose, &format!("  wrote {}", artifact.display()));
        }
        for error in &outcome.errors {
            eprintln!("Warning: {}: {error}", outcome.study.name);
        }
    }

    if !summary.any_best_trial() {
        return Err("No study has a completed trial".to_string());
    }
    Ok(())
}
