use clap::Parser;
use std::path::PathBuf;

/// Arguments for the build command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Build using ./uberpack.yaml:\n    uberpack build\n\n\
                   Build with an explicit config and output:\n    uberpack build --config ci/uberpack.yaml --output dist/app.jar\n\n\
                   Merge without writing anything:\n    uberpack build --dry-run")]
pub struct BuildArgs {
    /// Configuration file (defaults to uberpack.yaml in the current directory)
    #[arg(long, short = 'c', value_name = "FILE", env = "UBERPACK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output archive, overriding `output` from the configuration
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Scan and merge in memory without writing the output archive
    #[arg(long)]
    pub dry_run: bool,
}
