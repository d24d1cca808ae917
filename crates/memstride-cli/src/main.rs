//! memstride CLI - drives the copy benchmark and validation harness.

#![deny(missing_docs)]
#![deny(clippy::panic)]
#![warn(clippy::all, clippy::pedantic)]

mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// memstride: memory-copy variant benchmarking and validation
#[derive(Parser)]
#[command(name = "memstride")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List scenario indices and copy variant letters
    List,

    /// Benchmark copy variants against scenarios
    Run(commands::RunArgs),

    /// Validate copy variants for correctness instead of measuring
    Validate(commands::ValidateArgs),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List => commands::list(),
        Commands::Run(args) => commands::run(args),
        Commands::Validate(args) => commands::validate(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
