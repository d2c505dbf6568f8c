//! Capsample CLI Binary
//!
//! Command-line entry point for per-owner capacity reporting.

use capsample::logging;
use capsample::tooling::cli::{Cli, CliContext};
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.log_level.as_deref(), cli.verbose) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    let context = match CliContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    match context.execute().await {
        Ok(output) => {
            print!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
