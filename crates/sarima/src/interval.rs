//! Gaussian forecast confidence intervals.
//!
//! **Not part of the public API.**

use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::SarimaError;

/// Standard-normal quantile for a two-sided confidence level.
///
/// # Errors
///
/// [`SarimaError::InvalidConfidenceLevel`] when `level` is outside (0, 1).
pub(crate) fn two_sided_z(level: f64) -> Result<f64, SarimaError> {
    if !level.is_finite() || level <= 0.0 || level >= 1.0 {
        return Err(SarimaError::InvalidConfidenceLevel { level });
    }
    let normal = Normal::new(0.0, 1.0).expect("unit normal is well-formed");
    Ok(normal.inverse_cdf(0.5 + level / 2.0))
}

/// Interval bounds `mean ± z(level) · sqrt(variance)`.
pub(crate) fn interval(mean: f64, variance: f64, z: f64) -> (f64, f64) {
    let half_width = z * variance.max(0.0).sqrt();
    (mean - half_width, mean + half_width)
}
