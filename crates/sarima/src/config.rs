//! Fitting and forecasting options.

use crate::error::SarimaError;
use crate::kalman::DEFAULT_DIFFUSE_KAPPA;

/// Options controlling maximum-likelihood fitting and the default
/// forecast confidence level.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use janus_sarima::FitConfig;
///
/// let config = FitConfig::new()
///     .with_max_iterations(200)
///     .with_random_restarts(3);
/// ```
#[derive(Clone, Debug)]
pub struct FitConfig {
    max_iterations: u64,
    convergence_tolerance: f64,
    random_restarts: usize,
    confidence_level: f64,
    diffuse_kappa: f64,
    initial_guess: Option<Vec<f64>>,
}

impl FitConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `max_iterations = 500`, `convergence_tolerance = 1e-8`,
    /// `random_restarts = 0`, `confidence_level = 0.95`,
    /// `diffuse_kappa = 1e7`, no initial guess (zero coefficients).
    pub fn new() -> Self {
        Self {
            max_iterations: 500,
            convergence_tolerance: 1e-8,
            random_restarts: 0,
            confidence_level: 0.95,
            diffuse_kappa: DEFAULT_DIFFUSE_KAPPA,
            initial_guess: None,
        }
    }

    // --- Builder methods ---

    /// Sets the optimizer iteration budget. Exhausting it is non-fatal:
    /// the best iterate found is returned, flagged as non-converged.
    pub fn with_max_iterations(mut self, n: u64) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the convergence tolerance on log-likelihood improvement.
    pub fn with_convergence_tolerance(mut self, tol: f64) -> Self {
        self.convergence_tolerance = tol;
        self
    }

    /// Sets the number of deterministic perturbed restarts (0 disables).
    pub fn with_random_restarts(mut self, n: usize) -> Self {
        self.random_restarts = n;
        self
    }

    /// Sets the default two-sided confidence level used by forecasts.
    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    /// Sets the diffuse initial-state covariance magnitude.
    ///
    /// The Kalman filter starts from a zero state with covariance
    /// `kappa * I`. Larger values make the filter trust the first
    /// observations less (an approximately diffuse prior); values that
    /// are too large erode floating-point precision in the covariance
    /// updates, values that are too small bias the early likelihood
    /// contributions toward the zero initial state. The default of 1e7
    /// is appropriate for series of typical magnitude.
    pub fn with_diffuse_kappa(mut self, kappa: f64) -> Self {
        self.diffuse_kappa = kappa;
        self
    }

    /// Supplies a starting coefficient vector, concatenated as
    /// `[ar, ma, seasonal_ar, seasonal_ma]`. Must lie strictly inside the
    /// stationarity/invertibility region.
    pub fn with_initial_guess(mut self, guess: Vec<f64>) -> Self {
        self.initial_guess = Some(guess);
        self
    }

    // --- Accessors ---

    /// Returns the optimizer iteration budget.
    pub fn max_iterations(&self) -> u64 {
        self.max_iterations
    }

    /// Returns the convergence tolerance.
    pub fn convergence_tolerance(&self) -> f64 {
        self.convergence_tolerance
    }

    /// Returns the number of perturbed restarts.
    pub fn random_restarts(&self) -> usize {
        self.random_restarts
    }

    /// Returns the default forecast confidence level.
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Returns the diffuse initial-state covariance magnitude.
    pub fn diffuse_kappa(&self) -> f64 {
        self.diffuse_kappa
    }

    /// Returns the starting coefficient vector, if any.
    pub fn initial_guess(&self) -> Option<&[f64]> {
        self.initial_guess.as_deref()
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SarimaError::InvalidConfig`] | zero iteration budget, bad tolerance or kappa |
    /// | [`SarimaError::InvalidConfidenceLevel`] | level outside (0, 1) |
    pub fn validate(&self) -> Result<(), SarimaError> {
        if self.max_iterations == 0 {
            return Err(SarimaError::InvalidConfig {
                reason: "max_iterations must be at least 1".into(),
            });
        }
        if !self.convergence_tolerance.is_finite() || self.convergence_tolerance <= 0.0 {
            return Err(SarimaError::InvalidConfig {
                reason: format!(
                    "convergence_tolerance must be finite and > 0, got {}",
                    self.convergence_tolerance
                ),
            });
        }
        if !self.confidence_level.is_finite()
            || self.confidence_level <= 0.0
            || self.confidence_level >= 1.0
        {
            return Err(SarimaError::InvalidConfidenceLevel {
                level: self.confidence_level,
            });
        }
        if !self.diffuse_kappa.is_finite() || self.diffuse_kappa <= 0.0 {
            return Err(SarimaError::InvalidConfig {
                reason: format!(
                    "diffuse_kappa must be finite and > 0, got {}",
                    self.diffuse_kappa
                ),
            });
        }
        Ok(())
    }
}

impl Default for FitConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = FitConfig::new();
        assert_eq!(cfg.max_iterations(), 500);
        assert!((cfg.convergence_tolerance() - 1e-8).abs() < f64::EPSILON);
        assert_eq!(cfg.random_restarts(), 0);
        assert!((cfg.confidence_level() - 0.95).abs() < f64::EPSILON);
        assert!((cfg.diffuse_kappa() - 1e7).abs() < f64::EPSILON);
        assert!(cfg.initial_guess().is_none());
    }

    #[test]
    fn builder_chaining() {
        let cfg = FitConfig::new()
            .with_max_iterations(100)
            .with_convergence_tolerance(1e-6)
            .with_random_restarts(2)
            .with_confidence_level(0.8)
            .with_diffuse_kappa(1e5)
            .with_initial_guess(vec![0.1, 0.2]);

        assert_eq!(cfg.max_iterations(), 100);
        assert!((cfg.convergence_tolerance() - 1e-6).abs() < f64::EPSILON);
        assert_eq!(cfg.random_restarts(), 2);
        assert!((cfg.confidence_level() - 0.8).abs() < f64::EPSILON);
        assert!((cfg.diffuse_kappa() - 1e5).abs() < f64::EPSILON);
        assert_eq!(cfg.initial_guess(), Some(&[0.1, 0.2][..]));
    }

    #[test]
    fn validate_ok() {
        assert!(FitConfig::new().validate().is_ok());
    }

    #[test]
    fn validate_zero_iterations() {
        assert!(FitConfig::new().with_max_iterations(0).validate().is_err());
    }

    #[test]
    fn validate_bad_tolerance() {
        assert!(
            FitConfig::new()
                .with_convergence_tolerance(0.0)
                .validate()
                .is_err()
        );
        assert!(
            FitConfig::new()
                .with_convergence_tolerance(f64::NAN)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn validate_bad_confidence_level() {
        for level in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let err = FitConfig::new()
                .with_confidence_level(level)
                .validate()
                .unwrap_err();
            assert!(matches!(err, SarimaError::InvalidConfidenceLevel { .. }));
        }
    }

    #[test]
    fn validate_bad_kappa() {
        assert!(FitConfig::new().with_diffuse_kappa(0.0).validate().is_err());
        assert!(FitConfig::new().with_diffuse_kappa(-1.0).validate().is_err());
        assert!(
            FitConfig::new()
                .with_diffuse_kappa(f64::INFINITY)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn default_trait() {
        assert_eq!(
            FitConfig::new().max_iterations(),
            FitConfig::default().max_iterations()
        );
    }
}
