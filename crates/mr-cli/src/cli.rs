//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use mr_core::{Backend, RunMode};

/// Migrun - apply numbered SQL migration scripts in order
#[derive(Parser, Debug)]
#[command(name = "mr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory that relative paths resolve against
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path (default: migrun.yml in the project dir)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Load environment variables from this file instead of .env
    #[arg(long, global = true)]
    pub env_file: Option<String>,

    /// Override the migrations directory
    #[arg(short = 'd', long, global = true, env = "MIGRUN_DIR")]
    pub migrations_dir: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply all migration files in numeric order
    Run(RunArgs),

    /// List migration files in execution order
    Ls(LsArgs),

    /// Show the statements a script splits into
    Split(SplitArgs),
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Run mode; prompts when omitted
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Override the database backend
    #[arg(short, long, value_enum)]
    pub backend: Option<BackendArg>,

    /// DuckDB file path (duckdb backend only)
    #[arg(long)]
    pub database_path: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the ls command
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the split command
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// SQL script to split
    pub file: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Run mode choices
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Option 1: destructive statements allowed
    FullReset,
    /// Option 2: DROP TABLE statements skipped
    Additive,
}

impl From<ModeArg> for RunMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::FullReset => RunMode::FullReset,
            ModeArg::Additive => RunMode::Additive,
        }
    }
}

/// Database backend choices
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendArg {
    /// MySQL / MariaDB server
    Mysql,
    /// DuckDB file or in-memory database
    Duckdb,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Mysql => Backend::Mysql,
            BackendArg::Duckdb => Backend::DuckDb,
        }
    }
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
