//! Error types for the janus-sarima crate.

use janus_series::SeriesError;

/// Error type for all fallible operations in the janus-sarima crate.
///
/// Covers specification and configuration validation, data problems, and
/// numerical failures during fitting and forecasting. A fit that merely
/// fails to converge is not an error: the best iterate is returned with
/// [`SarimaFit::converged()`](crate::SarimaFit::converged) set to `false`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SarimaError {
    /// Returned when the series has fewer observations than the orders
    /// and differencing require.
    #[error("insufficient data: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Number of observations provided.
        n: usize,
        /// Minimum number of observations required.
        min: usize,
    },

    /// Returned when the model specification is structurally impossible.
    #[error("invalid model specification: {reason}")]
    InvalidSpec {
        /// Human-readable description of the violation.
        reason: String,
    },

    /// Returned when the differenced series has zero variance.
    #[error("differenced series is constant (zero variance)")]
    ConstantData,

    /// Returned when a fitting option fails validation.
    #[error("invalid fit configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the violation.
        reason: String,
    },

    /// Returned when the requested confidence level is outside (0, 1).
    #[error("confidence level must lie in (0, 1), got {level}")]
    InvalidConfidenceLevel {
        /// The offending level.
        level: f64,
    },

    /// Returned when a user-supplied initial guess lies outside the
    /// stationarity/invertibility region.
    #[error("initial guess is outside the stationarity/invertibility region")]
    UnstableInitialGuess,

    /// Returned by the Kalman filter when the one-step prediction
    /// variance becomes non-positive or non-finite.
    ///
    /// During optimization this is absorbed as an infeasible-candidate
    /// penalty and never escapes `fit`.
    #[error("prediction-error variance became non-positive or non-finite at step {t}")]
    FilterDivergence {
        /// Time step at which the filter diverged.
        t: usize,
    },

    /// Returned when no candidate parameter vector could be evaluated.
    #[error("optimisation failed: no evaluable iterate")]
    OptimizationFailed,

    /// A differencing or series-validation failure.
    #[error(transparent)]
    Series(#[from] SeriesError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_insufficient_data() {
        let err = SarimaError::InsufficientData { n: 5, min: 17 };
        assert_eq!(
            err.to_string(),
            "insufficient data: got 5 observations, need at least 17"
        );
    }

    #[test]
    fn error_invalid_spec() {
        let err = SarimaError::InvalidSpec {
            reason: "seasonal period must be at least 1".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid model specification: seasonal period must be at least 1"
        );
    }

    #[test]
    fn error_invalid_confidence_level() {
        let err = SarimaError::InvalidConfidenceLevel { level: 1.5 };
        assert_eq!(err.to_string(), "confidence level must lie in (0, 1), got 1.5");
    }

    #[test]
    fn error_filter_divergence() {
        let err = SarimaError::FilterDivergence { t: 12 };
        assert_eq!(
            err.to_string(),
            "prediction-error variance became non-positive or non-finite at step 12"
        );
    }

    #[test]
    fn error_from_series() {
        let err: SarimaError = SeriesError::Empty.into();
        assert_eq!(err.to_string(), "time series is empty");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<SarimaError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SarimaError>();
    }
}
