//! Confluence pages extractor CLI.
//!
//! Provides commands for:
//! - `run`: Extract Confluence pages into `out/tables/confluence_pages.csv`
//! - `check-config`: Validate configuration and state without network access
//!
//! Exit codes: 0 on success, 1 on configuration or Confluence errors,
//! 2 on anything else.

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckConfigArgs, RunArgs};
use output::Output;

/// Confluence pages extractor.
#[derive(Parser)]
#[command(name = "cpx", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract pages into the output table.
    Run(RunArgs),
    /// Validate configuration and state.
    CheckConfig(CheckConfigArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG
    let verbose = matches!(&cli.command, Commands::Run(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Run(args) => args.execute(),
        Commands::CheckConfig(args) => args.execute(),
    };

    if let Err(err) = result {
        if err.is_user_error() {
            output.error(&format!("Error: {err}"));
        } else {
            output.error(&format!("Unexpected error: {err}"));
            tracing::error!("{err:?}");
        }
        std::process::exit(err.exit_code());
    }
}
