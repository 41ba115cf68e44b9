use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod bootstrap;
mod config;
mod error;
mod evaluation;
mod label;
mod metrics;
mod models;
mod output;
mod runner;
mod statistics;
mod table;

use crate::config::Config;
use crate::output::OutputFormat;
use crate::runner::Runner;

/// Clustered bootstrap CLI - Confidence intervals for binary label predictions grouped by participant
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    run_file: PathBuf,

    /// Output format: plain, json or csv
    #[arg(short, long, default_value = "plain")]
    output: OutputFormat,

    /// Verbose output - log table loading and bootstrap progress
    #[arg(short, long)]
    verbose: bool,
}

/// Log to stderr; RUST_LOG overrides the level chosen by --verbose
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = Config::from_file(&args.run_file)?;
    let runner = Runner::new(config);

    let results = runner.run_evaluations()?;

    output::print_results(&results, args.output)?;

    Ok(())
}
