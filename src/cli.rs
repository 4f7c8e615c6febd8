use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Janus daily time-series forecaster.
#[derive(Parser)]
#[command(
    name = "janus",
    version,
    about = "SARIMA forecasting for daily time series"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Fit a SARIMA model and forecast ahead.
    Forecast(ForecastArgs),
    /// Write a synthetic daily traffic series to CSV.
    Synth(SynthArgs),
}

/// Arguments for the `forecast` subcommand.
///
/// Flags override values from the optional TOML configuration file;
/// built-in defaults apply when neither is given.
#[derive(clap::Args)]
pub struct ForecastArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Input CSV with `date,value` rows; omit to use a synthetic series.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write the forecast as CSV here instead of printing a table.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of steps to forecast.
    #[arg(long)]
    pub horizon: Option<usize>,

    /// Two-sided confidence level for the bounds.
    #[arg(long)]
    pub level: Option<f64>,

    /// RNG seed for the synthetic series.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Non-seasonal AR order.
    #[arg(short = 'p', long = "ar")]
    pub p: Option<usize>,

    /// Non-seasonal differencing order.
    #[arg(short = 'd', long = "diff")]
    pub d: Option<usize>,

    /// Non-seasonal MA order.
    #[arg(short = 'q', long = "ma")]
    pub q: Option<usize>,

    /// Seasonal AR order.
    #[arg(long)]
    pub seasonal_p: Option<usize>,

    /// Seasonal differencing order.
    #[arg(long)]
    pub seasonal_d: Option<usize>,

    /// Seasonal MA order.
    #[arg(long)]
    pub seasonal_q: Option<usize>,

    /// Seasonal period in steps (1 disables seasonality).
    #[arg(long)]
    pub period: Option<usize>,
}

/// Arguments for the `synth` subcommand.
#[derive(clap::Args)]
pub struct SynthArgs {
    /// Path for the output CSV.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Number of days to generate.
    #[arg(long)]
    pub days: Option<usize>,

    /// First date of the series (YYYY-MM-DD).
    #[arg(long)]
    pub start: Option<String>,

    /// RNG seed.
    #[arg(long)]
    pub seed: Option<u64>,
}
