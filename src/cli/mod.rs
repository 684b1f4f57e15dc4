//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - build: Build command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod build;
pub mod completions;

pub use build::BuildArgs;
pub use completions::CompletionsArgs;

/// Uberpack - uber-archive builder
///
/// Merge many JVM archives into one, combining same-path resources and relocating packages.
#[derive(Parser, Debug)]
#[command(
    name = "uberpack",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Merge JVM archives into a single uber-archive",
    long_about = "Uberpack merges a project archive and its dependencies into one uber-archive. \
                  Resources that appear in several inputs (manifests, service files, XML descriptors) \
                  are merged instead of overwritten, and packages can be relocated on the way.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  uberpack build                          \x1b[90m# Build from ./uberpack.yaml\x1b[0m\n   \
                  uberpack build -o dist/app.jar          \x1b[90m# Override the output path\x1b[0m\n   \
                  uberpack build --dry-run -v             \x1b[90m# Merge in memory, log every entry\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the uber-archive described by uberpack.yaml
    Build(BuildArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["uberpack", "completions", "zsh"]).unwrap();
        match cli.command {
            Commands::Completions(args) => assert_eq!(args.shell, "zsh"),
            Commands::Build(_) => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_cli_verbose_is_global() {
        let cli = Cli::try_parse_from(["uberpack", "build", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["uberpack"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
