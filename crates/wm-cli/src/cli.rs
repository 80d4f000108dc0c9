//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Waymark - versioned, checksum-verified SQL migrations
#[derive(Parser, Debug)]
#[command(name = "wm")]
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

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override database path
    #[arg(short, long, global = true, env = "WAYMARK_DATABASE")]
    pub database: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply pending migrations
    Migrate(MigrateArgs),

    /// Check migrations against applied history
    Validate(ValidateArgs),

    /// Show the status of every migration
    Info(InfoArgs),

    /// List the migrations `migrate` would apply
    Plan(PlanArgs),
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

/// Arguments for the info command
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: InfoOutput,
}

/// Info output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
