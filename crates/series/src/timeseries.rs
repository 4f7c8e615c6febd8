//! Validated, regularly sampled time series.

use chrono::{Duration, NaiveDate};

use crate::error::SeriesError;

/// An immutable, regularly sampled series of dated observations.
///
/// Construction validates the invariants the rest of the pipeline relies
/// on: non-empty, one value per date, finite values, strictly increasing
/// dates, and a uniform sampling interval. The interval is inferred from
/// the first two dates (a single-point series reports a step of one day).
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use janus_series::TimeSeries;
///
/// let start = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
/// let dates: Vec<_> = (0..4).map(|i| start + chrono::Duration::days(i)).collect();
/// let series = TimeSeries::new(dates, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(series.len(), 4);
/// assert_eq!(series.step_days(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
    step_days: i64,
}

impl TimeSeries {
    /// Builds a series from parallel date and value vectors.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SeriesError::Empty`] | no observations |
    /// | [`SeriesError::LengthMismatch`] | `dates.len() != values.len()` |
    /// | [`SeriesError::NonFinite`] | any value is NaN or infinite |
    /// | [`SeriesError::NonIncreasing`] | dates out of order or duplicated |
    /// | [`SeriesError::IrregularSpacing`] | gaps of unequal length |
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self, SeriesError> {
        if dates.is_empty() && values.is_empty() {
            return Err(SeriesError::Empty);
        }
        if dates.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                dates: dates.len(),
                values: values.len(),
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(SeriesError::NonFinite { index });
        }

        let step_days = if dates.len() >= 2 {
            (dates[1] - dates[0]).num_days()
        } else {
            1
        };
        for (i, pair) in dates.windows(2).enumerate() {
            let gap = (pair[1] - pair[0]).num_days();
            if gap <= 0 {
                return Err(SeriesError::NonIncreasing { index: i + 1 });
            }
            if gap != step_days {
                return Err(SeriesError::IrregularSpacing {
                    index: i + 1,
                    expected: step_days,
                    got: gap,
                });
            }
        }

        Ok(Self {
            dates,
            values,
            step_days,
        })
    }

    /// Builds a daily series starting at `start`.
    pub fn daily(start: NaiveDate, values: Vec<f64>) -> Result<Self, SeriesError> {
        let dates = (0..values.len() as i64)
            .map(|i| start + Duration::days(i))
            .collect();
        Self::new(dates, values)
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the series holds no observations.
    ///
    /// Always `false` for a constructed series; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Observation dates, in order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Observation values, in date order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Sampling interval in days (1 for a single-point series).
    pub fn step_days(&self) -> i64 {
        self.step_days
    }

    /// Date of the last observation.
    pub fn last_date(&self) -> NaiveDate {
        *self.dates.last().expect("validated non-empty")
    }

    /// The `n` dates that continue the series beyond its last observation,
    /// at the same sampling interval.
    pub fn future_dates(&self, n: usize) -> Vec<NaiveDate> {
        let last = self.last_date();
        (1..=n as i64)
            .map(|i| last + Duration::days(i * self.step_days))
            .collect()
    }
}
