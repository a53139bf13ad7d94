//! CLI command implementations

mod evaluate;
mod finalize;
mod runs;
mod select;
mod study_report;

#[cfg(test)]
mod tests;

use crate::cli::{init_tracing, LogLevel};
use crate::config::{Cli, Command, EvalConfig};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.quiet, cli.verbose);
    init_tracing(log_level);

    let config = EvalConfig::load(&cli.config).map_err(|e| format!("Config error: {e}"))?;

    match cli.command {
        Command::Evaluate(args) => evaluate::run_evaluate(args, &config, log_level),
        Command::Runs(args) => runs::run_runs(args, &config, log_level),
        Command::SelectBest(args) => select::run_select_best(args, &config, log_level),
        Command::Finalize(args) => finalize::run_finalize(args, &config, log_level),
        Command::StudyReport(args) => study_report::run_study_report(args, log_level),
    }
}
