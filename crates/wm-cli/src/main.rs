//! Waymark CLI - apply, validate, and inspect versioned SQL migrations

use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::common::ExitCode;
use commands::{info, migrate, plan, validate};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        cli::Commands::Migrate(args) => migrate::execute(args, &cli.global).await,
        cli::Commands::Validate(args) => validate::execute(args, &cli.global).await,
        cli::Commands::Info(args) => info::execute(args, &cli.global).await,
        cli::Commands::Plan(args) => plan::execute(args, &cli.global).await,
    };

    if let Err(err) = result {
        if let Some(ExitCode(code)) = err.downcast_ref::<ExitCode>() {
            std::process::exit(*code);
        }
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
