// File: crates/trend-cli/src/main.rs
// Summary: trend-csv entry point: logging setup, config layering, then the batch run.

mod batch;
mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trend_core::{DateLookup, ExtractConfig};
use trend_render_skia::{theme, RenderOptions};

use crate::batch::{run_batch, BatchJob};
use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => ExtractConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => ExtractConfig::default(),
    };
    cli.apply_overrides(&mut config);
    config.validate()?;

    let lookup = DateLookup::from_path(&cli.dates_file)
        .with_context(|| format!("loading date lookup {}", cli.dates_file.display()))?;
    info!(dates = lookup.len(), "loaded date lookup");

    let job = BatchJob {
        input_folder: cli.input_folder.clone(),
        output_folder: cli.output_folder.clone(),
        lookup,
        config,
        render: RenderOptions { theme: theme::find(&cli.theme), ..RenderOptions::default() },
        fail_fast: cli.fail_fast,
    };
    let summary = run_batch(&job)?;

    info!(written = summary.written.len(), failed = summary.failed.len(), "done");
    for (path, reason) in &summary.failed {
        info!(file = %path.display(), %reason, "skipped");
    }
    Ok(())
}
