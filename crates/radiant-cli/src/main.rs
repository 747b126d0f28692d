//! Radiant CLI - Command-line interface
//!
//! Thin command layer over `radiant-client`.

mod cli;
mod commands;
mod errors;
mod output;

use clap::Parser;
use cli::Cli;
use console::style;
use errors::CliError;

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(err) = commands::execute(cli) {
        match err.downcast_ref::<CliError>() {
            Some(cli_err) => cli_err.display(),
            None => eprintln!("{} {:#}", style("✗").red().bold(), err),
        }
        std::process::exit(1);
    }
}
