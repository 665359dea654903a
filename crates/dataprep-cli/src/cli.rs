//! Command-line definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};

#[derive(Debug, Parser)]
#[command(name = "dataprep", about = "Tabular data engine: load, clean, profile, plot, train")]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load a dataset and print its shape, dtypes, and preview.
    Info(FileArgs),
    /// Compute the statistical profile of a dataset.
    Profile(FileArgs),
    /// Apply cleaning operations and print the resulting dataset info.
    Clean(CleanArgs),
    /// Extract plot series for a column (or column pair).
    Plot(PlotArgs),
    /// Train a linear regression over selected columns.
    Train(TrainArgs),
}

#[derive(Debug, clap::Args)]
pub struct FileArgs {
    /// Input file (.csv or .xlsx).
    pub file: PathBuf,
}

#[derive(Debug, clap::Args)]
pub struct CleanArgs {
    /// Input file (.csv or .xlsx).
    pub file: PathBuf,
    /// Remove rows containing any missing value.
    #[arg(long)]
    pub drop_nulls: bool,
    /// Remove exact-duplicate rows, keeping the first occurrence.
    #[arg(long)]
    pub drop_duplicates: bool,
    /// Columns to remove (unknown names are ignored).
    #[arg(long, value_delimiter = ',')]
    pub drop_columns: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlotKindArg {
    Histogram,
    Scatter,
}

#[derive(Debug, clap::Args)]
pub struct PlotArgs {
    /// Input file (.csv or .xlsx).
    pub file: PathBuf,
    /// Plot type.
    #[arg(long, value_enum)]
    pub kind: PlotKindArg,
    /// X column.
    #[arg(short = 'x', long)]
    pub x: String,
    /// Y column (scatter only).
    #[arg(short = 'y', long)]
    pub y: Option<String>,
}

#[derive(Debug, clap::Args)]
pub struct TrainArgs {
    /// Input file (.csv or .xlsx).
    pub file: PathBuf,
    /// Feature columns.
    #[arg(long, value_delimiter = ',', required = true)]
    pub features: Vec<String>,
    /// Target column.
    #[arg(long)]
    pub target: String,
    /// Held-out fraction, strictly between 0 and 1.
    #[arg(long, default_value_t = 0.2)]
    pub test_size: f64,
}
