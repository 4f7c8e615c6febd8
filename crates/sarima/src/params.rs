//! Coefficient vector handling: the stationarity-preserving
//! reparametrization and the seasonal polynomial expansion.
//!
//! **Not part of the public API.**

use crate::error::SarimaError;
use crate::spec::SarimaSpec;

/// The four coefficient blocks of a SARIMA model, in natural
/// (lag-polynomial) form.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct SarimaParams {
    pub(crate) ar: Vec<f64>,
    pub(crate) ma: Vec<f64>,
    pub(crate) seasonal_ar: Vec<f64>,
    pub(crate) seasonal_ma: Vec<f64>,
}

impl SarimaParams {
    /// Maps an unconstrained optimizer vector (laid out as
    /// `[ar, ma, seasonal_ar, seasonal_ma]`) into stationary/invertible
    /// coefficients, block by block.
    pub(crate) fn from_unconstrained(theta: &[f64], spec: &SarimaSpec) -> Self {
        let (p, q) = (spec.p(), spec.q());
        let (sp, sq) = (spec.seasonal_p(), spec.seasonal_q());
        debug_assert_eq!(theta.len(), p + q + sp + sq);

        let ar = pacf_to_coeffs(&theta[..p]);
        let ma = pacf_to_coeffs(&theta[p..p + q]);
        let seasonal_ar = pacf_to_coeffs(&theta[p + q..p + q + sp]);
        let seasonal_ma = pacf_to_coeffs(&theta[p + q + sp..]);
        Self {
            ar,
            ma,
            seasonal_ar,
            seasonal_ma,
        }
    }

    /// Inverse of [`SarimaParams::from_unconstrained`]: recovers the
    /// unconstrained vector for a coefficient set strictly inside the
    /// stationarity/invertibility region.
    ///
    /// # Errors
    ///
    /// [`SarimaError::UnstableInitialGuess`] when any block lies on or
    /// outside the stability boundary.
    pub(crate) fn to_unconstrained(&self) -> Result<Vec<f64>, SarimaError> {
        let mut theta = Vec::with_capacity(
            self.ar.len() + self.ma.len() + self.seasonal_ar.len() + self.seasonal_ma.len(),
        );
        for block in [&self.ar, &self.ma, &self.seasonal_ar, &self.seasonal_ma] {
            let pacf = coeffs_to_pacf(block).ok_or(SarimaError::UnstableInitialGuess)?;
            theta.extend(pacf.iter().map(|r| r.atanh()));
        }
        Ok(theta)
    }

    /// Reduced-form AR coefficients of the product `phi(B) * PHI(B^s)`,
    /// length `p + s*P`.
    pub(crate) fn expanded_ar(&self, s: usize) -> Vec<f64> {
        expand_seasonal(&self.ar, &self.seasonal_ar, s, -1.0)
    }

    /// Reduced-form MA coefficients of the product `theta(B) * THETA(B^s)`,
    /// length `q + s*Q`.
    pub(crate) fn expanded_ma(&self, s: usize) -> Vec<f64> {
        expand_seasonal(&self.ma, &self.seasonal_ma, s, 1.0)
    }
}

/// Multiplies a non-seasonal lag polynomial with a seasonal one at period
/// `s`, returning reduced-form coefficients (the weight on lag `k` lands
/// at index `k - 1`).
///
/// `cross` is the sign of the cross terms: -1 for AR polynomials
/// (`(1 - a B)(1 - b B^s)` contributes `-a*b` at lag `s+1`), +1 for MA.
fn expand_seasonal(short: &[f64], seasonal: &[f64], s: usize, cross: f64) -> Vec<f64> {
    if seasonal.is_empty() {
        return short.to_vec();
    }
    let mut full = vec![0.0; short.len() + s * seasonal.len()];
    full[..short.len()].copy_from_slice(short);
    for (j, &cs) in seasonal.iter().enumerate() {
        let base = (j + 1) * s;
        full[base - 1] += cs;
        for (i, &c) in short.iter().enumerate() {
            full[base + i] += cross * c * cs;
        }
    }
    full
}

/// Maps unconstrained parameters to stationary/invertible coefficients
/// via the PACF parametrization (Jones 1980, Monahan 1984).
///
/// Step 1: `r_k = tanh(alpha_k)` maps each parameter to (-1, 1).
/// Step 2: Levinson-Durbin recursion converts partial autocorrelations
///         to polynomial coefficients.
pub(crate) fn pacf_to_coeffs(alpha: &[f64]) -> Vec<f64> {
    let p = alpha.len();
    if p == 0 {
        return Vec::new();
    }

    let r: Vec<f64> = alpha.iter().map(|a| a.tanh()).collect();

    let mut phi = vec![0.0; p];
    let mut prev = vec![0.0; p];
    phi[0] = r[0];
    for k in 1..p {
        prev[..p].copy_from_slice(&phi[..p]);
        phi[k] = r[k];
        for j in 0..k {
            phi[j] = prev[j] - r[k] * prev[k - 1 - j];
        }
    }
    phi
}

/// Inverse Levinson-Durbin recursion: polynomial coefficients back to
/// partial autocorrelations. Returns `None` when the coefficients lie on
/// or outside the stationarity boundary (some `|r_k| >= 1`).
pub(crate) fn coeffs_to_pacf(phi: &[f64]) -> Option<Vec<f64>> {
    let p = phi.len();
    if p == 0 {
        return Some(Vec::new());
    }

    let mut work = phi.to_vec();
    let mut r = vec![0.0; p];
    for k in (1..p).rev() {
        let a = work[k];
        if a.abs() >= 1.0 {
            return None;
        }
        r[k] = a;
        let denom = 1.0 - a * a;
        let prev: Vec<f64> = (0..k)
            .map(|j| (work[j] + a * work[k - 1 - j]) / denom)
            .collect();
        work[..k].copy_from_slice(&prev);
    }
    if work[0].abs() >= 1.0 {
        return None;
    }
    r[0] = work[0];
    Some(r)
}
