//! Configuration: YAML evaluation settings and the command-line definition

pub mod cli;
mod eval;

pub use cli::{
    parse_args, Cli, Command, EvaluateArgs, FinalizeArgs, OutputFormat, RunsArgs, RunsCommand,
    SelectBestArgs, StudyReportArgs,
};
pub use eval::{ConfigError, EvalConfig, Result, DEFAULT_CONFIG_PATH};
