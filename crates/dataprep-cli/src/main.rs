//! Tabular data engine CLI.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command};
use crate::commands::{run_clean, run_info, run_plot, run_profile, run_train};

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    let result = match &cli.command {
        Command::Info(args) => run_info(args),
        Command::Profile(args) => run_profile(args),
        Command::Clean(args) => run_clean(args),
        Command::Plot(args) => run_plot(args),
        Command::Train(args) => run_train(args),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error}");
            if error.is_validation() { 1 } else { 2 }
        }
    };
    std::process::exit(exit_code);
}

/// Explicit `-v`/`-q` flags override the `RUST_LOG` environment filter.
fn init_logging(cli: &Cli) {
    let filter = if cli.verbosity.is_present() {
        EnvFilter::new(cli.verbosity.tracing_level_filter().to_string())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(cli.verbosity.tracing_level_filter().to_string()))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
