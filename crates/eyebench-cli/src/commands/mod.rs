//! CLI command definitions.

pub mod collect;
pub mod plot;

use clap::{Parser, Subcommand};

/// Eye-region sharpness benchmark.
#[derive(Parser)]
#[command(name = "eyebench", version, about)]
pub struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Collect sharpness metrics for a battery of images
    Collect(collect::CollectArgs),
    /// Render histogram and boxplot figures from a results table
    Plot(plot::PlotArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every image was processed and committed.
    Success,
    /// The run finished but some images were discarded.
    PartialBatch,
    /// The command failed.
    Error,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => Self::from(0),
            ExitCode::PartialBatch => Self::from(1),
            ExitCode::Error => Self::from(2),
        }
    }
}
