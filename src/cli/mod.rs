//! Command-line parsing for the fragility evaluator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the evaluation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "frag", version, about = "Fragility curve damage-state evaluator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate damage-state probabilities for one component at one intensity.
    Eval(EvalArgs),
    /// Sample a component's fragility curves (CSV to stdout or a file).
    Curves(CurvesArgs),
    /// List the curve families registered in a model file.
    List(ModelArgs),
    /// Launch the interactive TUI.
    ///
    /// Renders the fragility family of the selected component with a
    /// Plotters chart and a live probability table.
    Tui(TuiArgs),
}

/// Model file selection shared by all subcommands.
#[derive(Debug, Args, Clone)]
pub struct ModelArgs {
    /// Model JSON file (defaults to `FRAGILITY_MODEL` from the environment / `.env`).
    #[arg(short = 'm', long, value_name = "JSON")]
    pub model: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct EvalArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Component identifier (e.g. `Pipe12`); digits are stripped to find its type.
    #[arg(short = 'c', long)]
    pub component: String,

    /// Intensity measure type of the observation (e.g. `PGA`).
    #[arg(short = 'i', long)]
    pub imt: String,

    /// Observed intensity value.
    #[arg(short = 'x', long)]
    pub value: f64,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Intensity samples per state for the plot and curve export.
    #[arg(long, default_value_t = 100)]
    pub samples: usize,

    /// Export the evaluation to JSON.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the sampled curves (`intensity,state,exceedance`) to CSV.
    #[arg(long = "export-curves")]
    pub export_curves: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct CurvesArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    #[arg(short = 'c', long)]
    pub component: String,

    #[arg(short = 'i', long)]
    pub imt: String,

    /// Lower end of the sampled intensity range.
    #[arg(long, default_value_t = 0.001)]
    pub min: f64,

    /// Upper end of the sampled intensity range.
    #[arg(long)]
    pub max: f64,

    /// Number of intensity samples.
    #[arg(long, default_value_t = 100)]
    pub samples: usize,

    /// Write CSV here instead of stdout.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Component to show first (defaults to the first registered family).
    #[arg(short = 'c', long)]
    pub component: Option<String>,

    /// Starting intensity value.
    #[arg(short = 'x', long, default_value_t = 0.3)]
    pub value: f64,
}
