use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use janus_sarima::ForecastResult;
use janus_series::TimeSeries;

/// One `date,value` row of a series CSV.
#[derive(Debug, Deserialize, Serialize)]
struct SeriesRow {
    date: NaiveDate,
    value: f64,
}

/// One row of a forecast CSV.
#[derive(Debug, Serialize)]
struct ForecastRow {
    date: NaiveDate,
    mean: f64,
    variance: f64,
    lower: f64,
    upper: f64,
}

/// Reads a `date,value` CSV into a validated [`TimeSeries`].
pub fn read_series_csv(path: &Path) -> Result<TimeSeries> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open series CSV: {}", path.display()))?;

    let mut dates = Vec::new();
    let mut values = Vec::new();
    for (i, record) in reader.deserialize().enumerate() {
        let row: SeriesRow =
            record.with_context(|| format!("bad record at line {}", i + 2))?;
        dates.push(row.date);
        values.push(row.value);
    }

    TimeSeries::new(dates, values)
        .with_context(|| format!("invalid series in {}", path.display()))
}

/// Writes a series as `date,value` CSV.
pub fn write_series_csv(path: &Path, series: &TimeSeries) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create CSV: {}", path.display()))?;
    for (date, value) in series.dates().iter().zip(series.values()) {
        writer.serialize(SeriesRow {
            date: *date,
            value: *value,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a forecast as `date,mean,variance,lower,upper` CSV.
pub fn write_forecast_csv(path: &Path, forecast: &ForecastResult) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create CSV: {}", path.display()))?;
    for pt in forecast.points() {
        writer.serialize(ForecastRow {
            date: pt.date,
            mean: pt.mean,
            variance: pt.variance,
            lower: pt.lower,
            upper: pt.upper,
        })?;
    }
    writer.flush()?;
    Ok(())
}
