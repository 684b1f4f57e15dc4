//! Build command implementation

use std::path::{Path, PathBuf};

use console::Style;
use tracing::{info, warn};

use crate::archive::{PassthroughWriter, ZipArchiveSource, ZipEntryWriter};
use crate::cli::BuildArgs;
use crate::config::{ArtifactInput, BuildConfig, BuildPlan, DEFAULT_CONFIG_FILE};
use crate::driver::{ArchiveSource, MemorySink, MergeDriver, MergeStats};
use crate::error::{Result, UberpackError, config_invalid};
use crate::progress::ProgressDisplay;

/// Outcome of a build, printed as the summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub output: Option<PathBuf>,
    pub stats: MergeStats,
    pub overlapping_groups: usize,
}

/// Run build command
pub fn run(args: BuildArgs) -> Result<()> {
    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = BuildConfig::load(&config_path)?;

    let summary = execute(&config, args.output, args.dry_run)?;
    print_summary(&summary);
    Ok(())
}

/// Build the uber-archive for a loaded configuration
pub fn execute(
    config: &BuildConfig,
    output_override: Option<PathBuf>,
    dry_run: bool,
) -> Result<BuildSummary> {
    let plan = config.plan()?;
    let inputs = plan.inputs();

    let mut sources = inputs
        .iter()
        .map(|input| open_input(input))
        .collect::<Result<Vec<_>>>()?;

    let mut driver = MergeDriver::new(config.registry()?, plan.relocators.clone());

    if dry_run {
        let stats = merge_in_memory(&mut driver, &mut sources)?;
        info!("Dry run, nothing written");
        return Ok(BuildSummary {
            output: None,
            stats,
            overlapping_groups: 0,
        });
    }

    let output = output_override.or_else(|| plan.output.clone()).ok_or_else(|| {
        config_invalid("no output path; set `output` in uberpack.yaml or pass --output")
    })?;
    if inputs.iter().any(|input| same_file(&input.path, &output)) {
        return Err(config_invalid(format!(
            "output {} is also an input archive",
            output.display()
        )));
    }

    let progress = ProgressDisplay::new(sources.len() as u64);
    match merge_to_archive(&mut driver, &mut sources, &plan, &output, &progress) {
        Ok(overlapping_groups) => {
            progress.finish();
            Ok(BuildSummary {
                output: Some(output),
                stats: driver.stats(),
                overlapping_groups,
            })
        }
        Err(e) => {
            progress.abandon();
            // A half-written archive is never valid output
            if let Err(remove_err) = std::fs::remove_file(&output) {
                warn!(path = %output.display(), error = %remove_err, "Could not remove partial output");
            }
            Err(e)
        }
    }
}

fn open_input(input: &ArtifactInput) -> Result<ZipArchiveSource> {
    if !input.path.is_file() {
        return Err(UberpackError::ArtifactFileMissing {
            coordinate: input.coordinate.to_string(),
            path: input.path.display().to_string(),
        });
    }
    ZipArchiveSource::open(&input.path)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn merge_in_memory(
    driver: &mut MergeDriver,
    sources: &mut [ZipArchiveSource],
) -> Result<MergeStats> {
    let mut sink = MemorySink::default();
    driver.run(sources, &mut sink)
}

fn merge_to_archive(
    driver: &mut MergeDriver,
    sources: &mut [ZipArchiveSource],
    plan: &BuildPlan,
    output: &Path,
    progress: &ProgressDisplay,
) -> Result<usize> {
    let mut writer = ZipEntryWriter::create(output)?;

    let overlapping_groups = {
        let mut passthrough =
            PassthroughWriter::new(&mut writer, &plan.relocators, plan.shade_sources);
        for source in sources.iter_mut() {
            progress.start_archive(source.identity());
            passthrough.begin_archive(source.identity());
            driver.scan(source, &mut passthrough)?;
            progress.inc_archive();
        }
        passthrough.report_overlaps()
    };

    driver.finalize(&mut writer)?;
    writer.finish()?;
    Ok(overlapping_groups)
}

fn print_summary(summary: &BuildSummary) {
    let stats = &summary.stats;
    match &summary.output {
        Some(output) => println!(
            "{} {}",
            Style::new().bold().green().apply_to("Built"),
            output.display()
        ),
        None => println!("{}", Style::new().bold().yellow().apply_to("Dry run")),
    }
    println!(
        "  {} archives scanned",
        Style::new().bold().apply_to(stats.archives)
    );
    println!(
        "  {} entries passed through",
        Style::new().bold().apply_to(stats.passed_through)
    );
    println!(
        "  {} entries merged into {} synthesized",
        Style::new().bold().apply_to(stats.claimed),
        Style::new().bold().apply_to(stats.synthesized)
    );
    if summary.overlapping_groups > 0 {
        println!(
            "  {}",
            Style::new()
                .yellow()
                .apply_to("some classes are defined by more than one archive, see warnings")
        );
    }
}
