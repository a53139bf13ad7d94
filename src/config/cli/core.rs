//! Core CLI types - Cli, Command, and argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;
use crate::config::DEFAULT_CONFIG_PATH;
use crate::eval::KappaVariant;
use crate::storage::{RankingMetric, RunId};

/// Foldscore: cross-validation scoring and model selection
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "foldscore")]
#[command(version)]
#[command(
    about = "Score classifier folds, record runs, select best models and report hyperparameter studies"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (defaults apply when it does not exist)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Score one run's predictions and record it
    Evaluate(EvaluateArgs),

    /// Inspect recorded runs
    Runs(RunsArgs),

    /// Copy the best run's model for each ranking metric
    SelectBest(SelectBestArgs),

    /// Designate the production model
    Finalize(FinalizeArgs),

    /// Summarize a hyperparameter study log
    StudyReport(StudyReportArgs),
}

/// Arguments for the evaluate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct EvaluateArgs {
    /// True labels, whitespace separated class indices
    #[arg(long)]
    pub labels: PathBuf,

    /// Predictions, one class index or probability row per line
    #[arg(long)]
    pub predictions: PathBuf,

    /// Model file produced for this run
    #[arg(long)]
    pub model: String,

    /// Trainer configuration used for this run
    #[arg(long)]
    pub model_config: String,

    /// Override the configured number of classes
    #[arg(long)]
    pub num_classes: Option<usize>,

    /// Override the configured designated kappa (cohen, quadratic_weighted)
    #[arg(long)]
    pub kappa: Option<KappaVariant>,

    /// Also write index,y_true,y_pred rows to this CSV file
    #[arg(long)]
    pub export_csv: Option<PathBuf>,

    /// Print the per-class classification report
    #[arg(long)]
    pub report: bool,
}

/// Arguments for the runs command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct RunsArgs {
    #[command(subcommand)]
    pub command: RunsCommand,
}

/// Run inspection subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum RunsCommand {
    /// List every run with the mean of each metric
    List {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show one run
    Show {
        /// Run id
        id: RunId,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Include stored predictions
        #[arg(long)]
        predictions: bool,
    },
}

/// Arguments for the select-best command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct SelectBestArgs {
    /// Ranking metric (macro_f1, kappa); both when omitted
    #[arg(short, long)]
    pub metric: Option<RankingMetric>,
}

/// Arguments for the finalize command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct FinalizeArgs {
    /// Model trained on the full data set
    #[arg(long)]
    pub model: String,

    /// Trainer configuration used for it
    #[arg(long)]
    pub model_config: String,
}

/// Arguments for the study-report command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct StudyReportArgs {
    /// SQLite study log
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Directory for the generated reports
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
