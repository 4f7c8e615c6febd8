//! Fitted SARIMA model results.

use chrono::NaiveDate;
use ndarray::{Array1, Array2};

use crate::kalman::KalmanOutput;
use crate::params::SarimaParams;
use crate::spec::SarimaSpec;

/// A fitted SARIMA model produced by [`SarimaSpec::fit()`].
///
/// Holds the estimated coefficient blocks, the concentrated innovation
/// variance (`sigma2`), the achieved log-likelihood, one-step prediction
/// residuals, and the terminal filter state needed to seed forecasting.
/// Immutable once created; call [`SarimaFit::forecast()`] to extend the
/// series forward.
///
/// # Typestate Workflow
///
/// ```mermaid
/// graph LR
///     B["SarimaFit"] --> C[".ar() / .ma() / .seasonal_ar() / .seasonal_ma()"]
///     B --> D[".sigma2() — innovation variance"]
///     B --> E[".log_likelihood() / .aic()"]
///     B --> F[".converged() — optimizer status"]
///     B --> G[".forecast(horizon)"]
/// ```
///
/// Forecasting an unfitted model is unrepresentable: a `SarimaFit` only
/// exists after a successful fit.
#[derive(Clone, Debug)]
pub struct SarimaFit {
    spec: SarimaSpec,
    params: SarimaParams,
    sigma2: f64,
    log_likelihood: f64,
    residuals: Vec<f64>,
    converged: bool,
    mean: f64,
    predicted_state: Array1<f64>,
    predicted_cov: Array2<f64>,
    history_tail: Vec<f64>,
    last_date: NaiveDate,
    step_days: i64,
    confidence_level: f64,
}

impl SarimaFit {
    /// Creates a new `SarimaFit` (crate-internal constructor).
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        spec: SarimaSpec,
        params: SarimaParams,
        output: KalmanOutput,
        mean: f64,
        converged: bool,
        history_tail: Vec<f64>,
        last_date: NaiveDate,
        step_days: i64,
        confidence_level: f64,
    ) -> Self {
        Self {
            spec,
            params,
            sigma2: output.sigma2,
            log_likelihood: output.log_likelihood,
            residuals: output.residuals,
            converged,
            mean,
            predicted_state: output.predicted_state,
            predicted_cov: output.predicted_cov,
            history_tail,
            last_date,
            step_days,
            confidence_level,
        }
    }

    /// Returns the [`SarimaSpec`] that produced this fit.
    pub fn spec(&self) -> SarimaSpec {
        self.spec
    }

    /// Non-seasonal AR coefficients (`phi`).
    pub fn ar(&self) -> &[f64] {
        &self.params.ar
    }

    /// Non-seasonal MA coefficients (`theta`).
    pub fn ma(&self) -> &[f64] {
        &self.params.ma
    }

    /// Seasonal AR coefficients (`Phi`).
    pub fn seasonal_ar(&self) -> &[f64] {
        &self.params.seasonal_ar
    }

    /// Seasonal MA coefficients (`Theta`).
    pub fn seasonal_ma(&self) -> &[f64] {
        &self.params.seasonal_ma
    }

    /// Concentrated innovation variance (`sigma2`).
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// Maximised log-likelihood on the differenced scale.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// One-step-ahead prediction residuals on the differenced scale.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Whether the optimizer met its convergence tolerance. `false`
    /// means the iteration budget ran out and this is the best iterate
    /// found.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Mean of the differenced series, restored at forecast time.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Default confidence level used by [`SarimaFit::forecast()`].
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Akaike Information Criterion: `2k - 2 * log_likelihood`, with
    /// `k = p + q + P + Q + 1` estimated parameters (coefficients plus
    /// the innovation variance).
    pub fn aic(&self) -> f64 {
        let k = (self.spec.n_params() + 1) as f64;
        2.0 * k - 2.0 * self.log_likelihood
    }

    // --- Crate-internal accessors for forecasting ---

    pub(crate) fn params(&self) -> &SarimaParams {
        &self.params
    }

    pub(crate) fn predicted_state(&self) -> &Array1<f64> {
        &self.predicted_state
    }

    pub(crate) fn predicted_cov(&self) -> &Array2<f64> {
        &self.predicted_cov
    }

    pub(crate) fn history_tail(&self) -> &[f64] {
        &self.history_tail
    }

    pub(crate) fn last_date(&self) -> NaiveDate {
        self.last_date
    }

    pub(crate) fn step_days(&self) -> i64 {
        self.step_days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    fn sample_fit() -> SarimaFit {
        let spec = SarimaSpec::new(1, 0, 1);
        let params = SarimaParams {
            ar: vec![0.5],
            ma: vec![0.3],
            ..Default::default()
        };
        let output = KalmanOutput {
            log_likelihood: -100.0,
            sigma2: 1.5,
            residuals: vec![0.1, -0.2, 0.3],
            predicted_state: arr1(&[0.0, 0.0]),
            predicted_cov: arr2(&[[1.0, 0.0], [0.0, 1.0]]),
        };
        SarimaFit::new(
            spec,
            params,
            output,
            2.0,
            true,
            vec![10.0],
            NaiveDate::from_ymd_opt(2022, 6, 28).unwrap(),
            1,
            0.95,
        )
    }

    #[test]
    fn accessors_round_trip() {
        let fit = sample_fit();
        assert_eq!(fit.spec().p(), 1);
        assert_eq!(fit.ar(), &[0.5]);
        assert_eq!(fit.ma(), &[0.3]);
        assert!(fit.seasonal_ar().is_empty());
        assert!(fit.seasonal_ma().is_empty());
        assert_eq!(fit.sigma2(), 1.5);
        assert_eq!(fit.log_likelihood(), -100.0);
        assert_eq!(fit.residuals(), &[0.1, -0.2, 0.3]);
        assert!(fit.converged());
        assert_eq!(fit.mean(), 2.0);
        assert_eq!(fit.confidence_level(), 0.95);
    }

    #[test]
    fn aic_computation() {
        // k = p + q + P + Q + 1 = 3, AIC = 2*3 - 2*(-100) = 206
        let fit = sample_fit();
        assert!((fit.aic() - 206.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fit_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<SarimaFit>();
    }

    #[test]
    fn send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SarimaFit>();
    }
}
