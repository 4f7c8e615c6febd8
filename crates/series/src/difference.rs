//! Non-seasonal and seasonal differencing, and its inverse.
//!
//! Differencing applies `d` rounds of `x[t] - x[t-1]` followed by `D`
//! rounds of `x[t] - x[t-s]`. Undifferencing is the exact algebraic
//! inverse: the trailing history supplies the boundary values and the
//! forecast increments are accumulated forward, inverting the seasonal
//! rounds first and the first-order rounds last.

use crate::error::SeriesError;

/// Applies `d` rounds of first-order differencing followed by `big_d`
/// rounds of seasonal differencing at lag `s`.
///
/// The output is shorter than the input by `d + big_d * s`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SeriesError::ZeroPeriod`] | `s == 0` |
/// | [`SeriesError::InsufficientHistory`] | `values.len() < d + big_d * s + 1` |
pub fn difference(
    values: &[f64],
    d: usize,
    big_d: usize,
    s: usize,
) -> Result<Vec<f64>, SeriesError> {
    if s == 0 {
        return Err(SeriesError::ZeroPeriod);
    }
    let min = d + big_d * s + 1;
    if values.len() < min {
        return Err(SeriesError::InsufficientHistory {
            n: values.len(),
            min,
        });
    }

    let mut out = values.to_vec();
    for _ in 0..d {
        out = lagged_difference(&out, 1);
    }
    for _ in 0..big_d {
        out = lagged_difference(&out, s);
    }
    Ok(out)
}

/// Maps a forecast on the differenced scale back to the original scale.
///
/// `history` must hold at least the last `d + big_d * s + 1` observations
/// of the original series; its intermediate differencing ladder is rebuilt
/// to supply the boundary values for each integration round. An empty
/// forecast maps to an empty result.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SeriesError::ZeroPeriod`] | `s == 0` |
/// | [`SeriesError::InsufficientHistory`] | `history.len() < d + big_d * s + 1` |
pub fn undifference(
    forecast: &[f64],
    history: &[f64],
    d: usize,
    big_d: usize,
    s: usize,
) -> Result<Vec<f64>, SeriesError> {
    if s == 0 {
        return Err(SeriesError::ZeroPeriod);
    }
    let min = d + big_d * s + 1;
    if history.len() < min {
        return Err(SeriesError::InsufficientHistory {
            n: history.len(),
            min,
        });
    }
    if forecast.is_empty() {
        return Ok(Vec::new());
    }

    // Ladder of intermediate series: levels[0] is the original history,
    // levels[d] is after all first-order rounds, levels[d + big_d] is the
    // fully differenced scale the forecast lives on.
    let mut levels: Vec<Vec<f64>> = Vec::with_capacity(d + big_d + 1);
    levels.push(history.to_vec());
    for _ in 0..d {
        let next = lagged_difference(levels.last().expect("ladder non-empty"), 1);
        levels.push(next);
    }
    for _ in 0..big_d {
        let next = lagged_difference(levels.last().expect("ladder non-empty"), s);
        levels.push(next);
    }

    // Integrate back down the ladder: seasonal rounds first (they were
    // applied last), then first-order rounds.
    let mut out = forecast.to_vec();
    for level in (1..=d + big_d).rev() {
        let lag = if level > d { s } else { 1 };
        out = integrate(&out, &levels[level - 1], lag);
    }
    Ok(out)
}

/// One round of `x[t] - x[t-lag]`.
fn lagged_difference(values: &[f64], lag: usize) -> Vec<f64> {
    values
        .windows(lag + 1)
        .map(|w| w[lag] - w[0])
        .collect()
}

/// Inverts one round of lagged differencing over the forecast horizon.
///
/// `boundary` is the series one level down the ladder; its last `lag`
/// values seed the recursion `x[t] = x[t - lag] + y[t]`.
fn integrate(increments: &[f64], boundary: &[f64], lag: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(increments.len());
    for (t, &inc) in increments.iter().enumerate() {
        let prev = if t >= lag {
            out[t - lag]
        } else {
            boundary[boundary.len() - lag + t]
        };
        out.push(prev + inc);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn first_difference_by_hand() {
        let out = difference(&[1.0, 4.0, 9.0, 16.0], 1, 0, 1).unwrap();
        assert_eq!(out, vec![3.0, 5.0, 7.0]);
    }

    #[test]
    fn second_difference_by_hand() {
        // Second difference of a quadratic is constant.
        let values: Vec<f64> = (0..6).map(|i| (i * i) as f64).collect();
        let out = difference(&values, 2, 0, 1).unwrap();
        assert_eq!(out, vec![2.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn seasonal_difference_by_hand() {
        let values = [1.0, 2.0, 3.0, 11.0, 12.0, 13.0];
        let out = difference(&values, 0, 1, 3).unwrap();
        assert_eq!(out, vec![10.0, 10.0, 10.0]);
    }

    #[test]
    fn combined_difference_removes_trend_and_season() {
        // Linear trend plus exact period-3 pattern vanishes under d=1, D=1.
        let pattern = [5.0, -2.0, 7.0];
        let values: Vec<f64> = (0..12).map(|i| 2.0 * i as f64 + pattern[i % 3]).collect();
        let out = difference(&values, 1, 1, 3).unwrap();
        assert_eq!(out.len(), 12 - 1 - 3);
        for v in out {
            assert_abs_diff_eq!(v, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn zero_orders_are_identity() {
        let values = [3.0, 1.0, 4.0];
        let out = difference(&values, 0, 0, 7).unwrap();
        assert_eq!(out, values.to_vec());
    }

    #[test]
    fn zero_period_fails() {
        let err = difference(&[1.0, 2.0], 1, 0, 0).unwrap_err();
        assert!(matches!(err, SeriesError::ZeroPeriod));
    }

    #[test]
    fn length_boundary() {
        // Exactly d + D*s + 1 values differences to a single point.
        let values = [1.0, 2.0, 4.0, 7.0, 11.0];
        assert_eq!(difference(&values, 1, 1, 3).unwrap().len(), 1);

        let err = difference(&values[..4], 1, 1, 3).unwrap_err();
        assert!(matches!(err, SeriesError::InsufficientHistory { n: 4, min: 5 }));
    }

    #[test]
    fn undifference_insufficient_history() {
        let err = undifference(&[1.0], &[1.0, 2.0], 1, 1, 3).unwrap_err();
        assert!(matches!(err, SeriesError::InsufficientHistory { n: 2, min: 5 }));
    }

    #[test]
    fn undifference_empty_forecast() {
        let out = undifference(&[], &[1.0, 2.0, 3.0], 1, 0, 1).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn round_trip_first_order() {
        // Difference the whole series, then rebuild the future part from
        // the historical prefix.
        let values: Vec<f64> = vec![3.0, 7.0, 2.0, 9.0, 4.0, 8.0, 1.0, 6.0];
        let split = 5;
        let diffed = difference(&values, 1, 0, 1).unwrap();
        let future_increments = &diffed[split - 1..];
        let rebuilt = undifference(future_increments, &values[..split], 1, 0, 1).unwrap();
        for (got, want) in rebuilt.iter().zip(&values[split..]) {
            assert_abs_diff_eq!(got, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn round_trip_seasonal() {
        let values: Vec<f64> = (0..20).map(|i| ((i * 13) % 17) as f64).collect();
        let (d, big_d, s) = (1, 1, 4);
        let split = 12;
        let diffed = difference(&values, d, big_d, s).unwrap();
        let consumed = d + big_d * s;
        let future_increments = &diffed[split - consumed..];
        let rebuilt = undifference(future_increments, &values[..split], d, big_d, s).unwrap();
        assert_eq!(rebuilt.len(), values.len() - split);
        for (got, want) in rebuilt.iter().zip(&values[split..]) {
            assert_abs_diff_eq!(got, want, epsilon = 1e-12);
        }
    }
}
