//! The `plot` command: reshape a results table by blur level and render the
//! histogram and boxplot figures.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::info;

use eyebench_adapters::read_table;
use eyebench_core::Dataset;

use crate::plot::{render_boxplots, render_histograms};

/// Arguments for the plot command.
#[derive(Args)]
pub struct PlotArgs {
    /// Results CSV produced by the collect command
    pub csv: PathBuf,

    /// Histogram figure output path
    #[arg(long, default_value = "histograms.png")]
    pub histograms: PathBuf,

    /// Boxplot figure output path
    #[arg(long, default_value = "boxplots.png")]
    pub boxplots: PathBuf,

    /// Number of blur levels per image in the table
    #[arg(long, default_value_t = 6)]
    pub sigma_count: usize,
}

/// Execute the plot command.
pub fn run(args: &PlotArgs) -> Result<()> {
    let records = read_table(&args.csv)?;
    if records.is_empty() {
        bail!("{} holds no rows, nothing to plot", args.csv.display());
    }

    let dataset = Dataset::from_records(&records, args.sigma_count)
        .with_context(|| format!("cannot reshape {}", args.csv.display()))?;
    info!(
        images = dataset.image_count(),
        blur_levels = dataset.sigma_count,
        "rendering figures"
    );

    render_histograms(&dataset, &args.histograms)
        .with_context(|| format!("failed to render {}", args.histograms.display()))?;
    render_boxplots(&dataset, &args.boxplots)
        .with_context(|| format!("failed to render {}", args.boxplots.display()))?;

    eprintln!(
        "Wrote {} and {}.",
        args.histograms.display(),
        args.boxplots.display()
    );
    Ok(())
}
