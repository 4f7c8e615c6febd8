//! Multi-step forecasting from a fitted model.
//!
//! Extends the terminal filter state forward with no new observations:
//! the mean evolves through the transition operator, the covariance grows
//! by process-noise injection, so forecast variance is non-decreasing in
//! the horizon. Differenced-scale means are mapped back to the original
//! scale through [`janus_series::undifference`] using the history tail
//! retained at fit time.

use chrono::{Duration, NaiveDate};

use janus_series::undifference;

use crate::error::SarimaError;
use crate::fit::SarimaFit;
use crate::interval;
use crate::state_space::StateSpace;

/// One forecast step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForecastPoint {
    /// Date of the forecast step.
    pub date: NaiveDate,
    /// Predicted mean on the original scale.
    pub mean: f64,
    /// Forecast variance on the differenced scale.
    pub variance: f64,
    /// Lower confidence bound.
    pub lower: f64,
    /// Upper confidence bound.
    pub upper: f64,
}

/// Ordered multi-step forecast produced by [`SarimaFit::forecast()`].
///
/// One entry per horizon step, at the sampling interval of the fitted
/// series, dated immediately after its last observation. Never mutated
/// after creation.
#[derive(Clone, Debug)]
pub struct ForecastResult {
    points: Vec<ForecastPoint>,
    level: f64,
}

impl ForecastResult {
    /// The forecast steps, in date order.
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// Number of forecast steps.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` for a zero-step forecast.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The two-sided confidence level of the bounds.
    pub fn level(&self) -> f64 {
        self.level
    }
}

impl SarimaFit {
    /// Forecasts `horizon` steps ahead at the fit's configured
    /// confidence level.
    ///
    /// See [`SarimaFit::forecast_with_level()`] for errors.
    pub fn forecast(&self, horizon: usize) -> Result<ForecastResult, SarimaError> {
        self.forecast_with_level(horizon, self.confidence_level())
    }

    /// Forecasts `horizon` steps ahead with explicit confidence level.
    ///
    /// Returns the complete horizon or fails without partial output.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SarimaError::InvalidConfidenceLevel`] | `level` outside (0, 1) |
    /// | [`SarimaError::FilterDivergence`] | non-finite variance during propagation |
    pub fn forecast_with_level(
        &self,
        horizon: usize,
        level: f64,
    ) -> Result<ForecastResult, SarimaError> {
        let z = interval::two_sided_z(level)?;
        if horizon == 0 {
            return Ok(ForecastResult {
                points: Vec::new(),
                level,
            });
        }

        let spec = self.spec();
        let ss = StateSpace::from_params(self.params(), spec.period());
        let t = ss.t();

        // Propagate mean and covariance forward from a_{n+1|n}, P_{n+1|n}.
        let mut a = self.predicted_state().clone();
        let mut p = self.predicted_cov().clone();
        let mut means = Vec::with_capacity(horizon);
        let mut variances = Vec::with_capacity(horizon);
        for step in 0..horizon {
            let mean = a[0] + self.mean();
            let variance = p[[0, 0]] * self.sigma2();
            if !mean.is_finite() || !variance.is_finite() {
                return Err(SarimaError::FilterDivergence { t: step });
            }
            means.push(mean);
            variances.push(variance.max(0.0));

            a = t.dot(&a);
            p = t.dot(&p).dot(&t.t()) + ss.rrt();
        }

        // Back to the original scale.
        let means = undifference(
            &means,
            self.history_tail(),
            spec.d(),
            spec.seasonal_d(),
            spec.period(),
        )?;

        let points = means
            .into_iter()
            .zip(variances)
            .enumerate()
            .map(|(step, (mean, variance))| {
                let (lower, upper) = interval::interval(mean, variance, z);
                ForecastPoint {
                    date: self.last_date()
                        + Duration::days(self.step_days() * (step as i64 + 1)),
                    mean,
                    variance,
                    lower,
                    upper,
                }
            })
            .collect();

        Ok(ForecastResult { points, level })
    }
}
