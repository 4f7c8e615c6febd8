//! SARIMA model specification (unfitted).

use janus_series::TimeSeries;

use crate::config::FitConfig;
use crate::error::SarimaError;
use crate::fit::SarimaFit;

/// An unfitted SARIMA(p,d,q)(P,D,Q)_s model specification.
///
/// This is the entry point of the typestate workflow. Create a spec with
/// [`SarimaSpec::new()`], optionally add a seasonal part with
/// [`SarimaSpec::with_seasonal()`], then call [`SarimaSpec::fit()`] to
/// obtain a [`SarimaFit`].
///
/// # Typestate Workflow
///
/// ```mermaid
/// graph LR
///     A["SarimaSpec::new(p, d, q)"] -->|".with_seasonal(P, D, Q, s)"| A
///     A -->|".fit(&series)?"| B["SarimaFit"]
///     B -->|".forecast(horizon)?"| C["ForecastResult"]
/// ```
///
/// A seasonal period of 1 disables the seasonal part: the seasonal orders
/// are then treated as zero throughout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SarimaSpec {
    p: usize,
    d: usize,
    q: usize,
    seasonal_p: usize,
    seasonal_d: usize,
    seasonal_q: usize,
    s: usize,
}

impl SarimaSpec {
    /// Creates a non-seasonal ARIMA(p,d,q) specification.
    ///
    /// # Example
    ///
    /// ```
    /// use janus_sarima::SarimaSpec;
    ///
    /// let spec = SarimaSpec::new(1, 1, 1).with_seasonal(1, 1, 1, 7);
    /// assert_eq!(spec.p(), 1);
    /// assert_eq!(spec.period(), 7);
    /// ```
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self {
            p,
            d,
            q,
            seasonal_p: 0,
            seasonal_d: 0,
            seasonal_q: 0,
            s: 1,
        }
    }

    /// Adds a seasonal (P,D,Q)_s part.
    pub fn with_seasonal(mut self, p: usize, d: usize, q: usize, s: usize) -> Self {
        self.seasonal_p = p;
        self.seasonal_d = d;
        self.seasonal_q = q;
        self.s = s;
        self
    }

    /// Non-seasonal AR order (`p`).
    pub fn p(&self) -> usize {
        self.p
    }

    /// Non-seasonal differencing order (`d`).
    pub fn d(&self) -> usize {
        self.d
    }

    /// Non-seasonal MA order (`q`).
    pub fn q(&self) -> usize {
        self.q
    }

    /// Effective seasonal AR order (`P`), zero when the period is 1.
    pub fn seasonal_p(&self) -> usize {
        if self.s > 1 { self.seasonal_p } else { 0 }
    }

    /// Effective seasonal differencing order (`D`), zero when the period is 1.
    pub fn seasonal_d(&self) -> usize {
        if self.s > 1 { self.seasonal_d } else { 0 }
    }

    /// Effective seasonal MA order (`Q`), zero when the period is 1.
    pub fn seasonal_q(&self) -> usize {
        if self.s > 1 { self.seasonal_q } else { 0 }
    }

    /// Seasonal period (`s`); 1 means no seasonality.
    pub fn period(&self) -> usize {
        self.s
    }

    /// Number of free coefficients (`p + q + P + Q`).
    pub fn n_params(&self) -> usize {
        self.p + self.q + self.seasonal_p() + self.seasonal_q()
    }

    /// Minimum series length this specification can be fitted to:
    /// `p + d + s·(P + D) + q + s·Q + 1`.
    pub fn min_observations(&self) -> usize {
        self.p
            + self.d
            + self.s * (self.seasonal_p() + self.seasonal_d())
            + self.q
            + self.s * self.seasonal_q()
            + 1
    }

    /// Validates the specification.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SarimaError::InvalidSpec`] | `s == 0`, or no AR/MA term at all |
    pub fn validate(&self) -> Result<(), SarimaError> {
        if self.s == 0 {
            return Err(SarimaError::InvalidSpec {
                reason: "seasonal period must be at least 1".into(),
            });
        }
        if self.n_params() == 0 {
            return Err(SarimaError::InvalidSpec {
                reason: "model has no AR or MA terms".into(),
            });
        }
        Ok(())
    }

    /// Fits this specification to a series with default options.
    ///
    /// See [`SarimaSpec::fit_with()`] for errors.
    pub fn fit(&self, series: &TimeSeries) -> Result<SarimaFit, SarimaError> {
        self.fit_with(series, &FitConfig::new())
    }

    /// Fits this specification to a series via exact maximum likelihood
    /// (state-space Kalman filter, L-BFGS over reparametrized
    /// coefficients).
    ///
    /// A fit that exhausts its iteration budget still returns the best
    /// iterate found, with [`SarimaFit::converged()`] set to `false`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SarimaError::InvalidSpec`] | structurally impossible orders |
    /// | [`SarimaError::InvalidConfig`] | bad fitting options |
    /// | [`SarimaError::InsufficientData`] | series shorter than [`SarimaSpec::min_observations()`] |
    /// | [`SarimaError::ConstantData`] | differenced series has zero variance |
    /// | [`SarimaError::UnstableInitialGuess`] | initial guess outside the stable region |
    /// | [`SarimaError::OptimizationFailed`] | no candidate could be evaluated |
    pub fn fit_with(
        &self,
        series: &TimeSeries,
        config: &FitConfig,
    ) -> Result<SarimaFit, SarimaError> {
        crate::optimizer::fit_sarima(self, series, config)
    }
}
