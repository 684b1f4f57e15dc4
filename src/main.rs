//! Uberpack - uber-archive builder
//!
//! Command line entry point; all work happens in the `uberpack` library.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use uberpack::cli::{Cli, Commands};
use uberpack::commands;

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        "uberpack=debug"
    } else {
        "uberpack=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Build(args) => commands::build::run(args),
        Commands::Completions(args) => commands::completions::run(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
