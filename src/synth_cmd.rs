use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use crate::cli::SynthArgs;
use crate::series_io::write_series_csv;
use crate::synth;

/// Generate a synthetic traffic series and write it to CSV.
pub fn run(args: SynthArgs) -> Result<()> {
    let start: NaiveDate = args
        .start
        .as_deref()
        .unwrap_or("2021-06-01")
        .parse()
        .context("invalid --start date")?;
    let days = args.days.unwrap_or(393);
    let seed = args.seed.unwrap_or(42);

    let series = synth::traffic_series(days, start, seed);
    write_series_csv(&args.output, &series)?;
    info!(
        path = %args.output.display(),
        days,
        seed,
        "synthetic series written"
    );
    Ok(())
}
