use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sqlverdict",
    version,
    about = "Judge text-to-SQL benchmark results by result-set equivalence"
)]
pub struct Cli {
    /// Log filter (EnvFilter syntax)
    #[arg(long, global = true, env = "SQLVERDICT_LOG", default_value = "info")]
    pub log_level: String,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Judge every case of a dataset and report category statistics
    Evaluate(EvaluateArgs),
    /// Write a sample config
    Init(InitArgs),
    /// List the registered special judges
    Judges,
    Version,
}

#[derive(clap::Args, Debug, Clone)]
pub struct EvaluateArgs {
    #[arg(long, default_value = "sqlverdict.yaml")]
    pub config: PathBuf,

    /// Override the dataset path from the config
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Override the annotation file from the config
    #[arg(long)]
    pub annotations: Option<PathBuf>,

    /// Override settings.parallel
    #[arg(long)]
    pub parallel: Option<usize>,

    /// Reject unknown config keys
    #[arg(long)]
    pub strict: bool,

    /// Exit with 1 when accuracy (0.0-1.0) ends up below this value
    #[arg(long)]
    pub fail_under: Option<f64>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct InitArgs {
    #[arg(long, default_value = "sqlverdict.yaml")]
    pub config: PathBuf,
}
