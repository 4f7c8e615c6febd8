//! SARIMA state-space representation.
//!
//! Converts the multiplied seasonal/non-seasonal ARMA polynomials into
//! Harvey companion form:
//!
//! ```text
//! x[t+1] = T * x[t] + R * e[t]     (state transition)
//! y[t]   = Z' * x[t]                (observation, Z = e1)
//! ```
//!
//! where `T` is the transition matrix, `R` the noise-input vector and
//! `e[t] ~ N(0, sigma2)`. The innovation variance is concentrated out of
//! the likelihood, so the filter runs with unit process noise and `R·Rᵀ`
//! is the process-noise matrix.
//!
//! This is a pure, total mapping: stability of the coefficients is the
//! optimizer's concern, not checked here.
//!
//! **Not part of the public API.**

use ndarray::{Array1, Array2, Axis};

use crate::params::SarimaParams;

/// State-space form of a SARIMA model at fixed coefficients.
///
/// Holds the transition matrix `T`, noise input vector `R`, and
/// precomputed `R·Rᵀ` for the Kalman filter.
#[derive(Clone, Debug)]
pub(crate) struct StateSpace {
    dim: usize,
    t: Array2<f64>,
    r_vec: Array1<f64>,
    rrt: Array2<f64>,
}

impl StateSpace {
    /// Builds the companion form for the expanded polynomials of
    /// `params` at seasonal period `s`.
    pub(crate) fn from_params(params: &SarimaParams, s: usize) -> Self {
        Self::new(&params.expanded_ar(s), &params.expanded_ma(s))
    }

    /// Builds a state-space representation from reduced-form AR and MA
    /// coefficient vectors (already seasonally expanded).
    pub(crate) fn new(ar: &[f64], ma: &[f64]) -> Self {
        let p = ar.len();
        let q = ma.len();
        let dim = p.max(q + 1).max(1);

        // Transition matrix T (dim×dim) in companion form:
        // first column carries the AR coefficients, the super-diagonal
        // shifts the state.
        let mut t = Array2::zeros((dim, dim));
        for (i, &phi) in ar.iter().enumerate() {
            t[[i, 0]] = phi;
        }
        for i in 0..dim.saturating_sub(1) {
            t[[i, i + 1]] = 1.0;
        }

        // Noise input vector R = [1, theta_1, ..., theta_q, 0, ...].
        let mut r_vec = Array1::zeros(dim);
        r_vec[0] = 1.0;
        for (j, &theta) in ma.iter().enumerate() {
            r_vec[j + 1] = theta;
        }

        // R·Rᵀ as the rank-1 outer product.
        let r_col = r_vec.view().insert_axis(Axis(1));
        let r_row = r_vec.view().insert_axis(Axis(0));
        let rrt = r_col.dot(&r_row);

        Self { dim, t, r_vec, rrt }
    }

    /// State dimension `max(p + s·P, q + s·Q + 1)`, minimum 1.
    pub(crate) fn dim(&self) -> usize {
        self.dim
    }

    /// Transition matrix `T` (dim×dim) in companion form.
    pub(crate) fn t(&self) -> &Array2<f64> {
        &self.t
    }

    /// Noise input vector `R` (length dim).
    pub(crate) fn r_vec(&self) -> &Array1<f64> {
        &self.r_vec
    }

    /// Precomputed `R·Rᵀ` (dim×dim).
    pub(crate) fn rrt(&self) -> &Array2<f64> {
        &self.rrt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::SarimaSpec;
    use approx::assert_abs_diff_eq;

    #[test]
    fn ar1() {
        let ss = StateSpace::new(&[0.5], &[]);
        assert_eq!(ss.dim(), 1);
        assert_abs_diff_eq!(ss.t()[[0, 0]], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(ss.r_vec()[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ss.rrt()[[0, 0]], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn ma1() {
        let ss = StateSpace::new(&[], &[0.8]);
        assert_eq!(ss.dim(), 2);

        // T = [[0, 1], [0, 0]], R = [1.0, 0.8]
        assert_abs_diff_eq!(ss.t()[[0, 0]], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ss.t()[[0, 1]], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ss.t()[[1, 0]], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ss.r_vec()[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ss.r_vec()[1], 0.8, epsilon = 1e-12);
    }

    #[test]
    fn arma11() {
        let ss = StateSpace::new(&[0.7], &[0.3]);
        assert_eq!(ss.dim(), 2);

        // T = [[0.7, 1.0], [0.0, 0.0]], R = [1.0, 0.3]
        assert_abs_diff_eq!(ss.t()[[0, 0]], 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(ss.t()[[0, 1]], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ss.t()[[1, 0]], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ss.r_vec()[1], 0.3, epsilon = 1e-12);
    }

    #[test]
    fn seasonal_arma_dimension() {
        // SARIMA(1,_,1)(1,_,1)_7: expanded AR length 8, MA length 8,
        // state dimension max(8, 8 + 1) = 9.
        let spec = SarimaSpec::new(1, 0, 1).with_seasonal(1, 0, 1, 7);
        let params = crate::params::SarimaParams::from_unconstrained(
            &[0.4, 0.3, 0.2, 0.1],
            &spec,
        );
        let ss = StateSpace::from_params(&params, 7);
        assert_eq!(ss.dim(), 9);
    }

    #[test]
    fn seasonal_ar_lands_on_expanded_lags() {
        let params = crate::params::SarimaParams {
            ar: vec![0.5],
            seasonal_ar: vec![0.3],
            ..Default::default()
        };
        let ss = StateSpace::from_params(&params, 4);
        // Expanded AR = [0.5, 0, 0, 0.3, -0.15] in the first column.
        assert_eq!(ss.dim(), 5);
        assert_abs_diff_eq!(ss.t()[[0, 0]], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(ss.t()[[3, 0]], 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(ss.t()[[4, 0]], -0.15, epsilon = 1e-12);
        // Super-diagonal is all ones.
        for i in 0..4 {
            assert_abs_diff_eq!(ss.t()[[i, i + 1]], 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn empty_model_still_has_dimension_one() {
        let ss = StateSpace::new(&[], &[]);
        assert_eq!(ss.dim(), 1);
        assert_abs_diff_eq!(ss.t()[[0, 0]], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ss.rrt()[[0, 0]], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn rrt_is_outer_product() {
        let ss = StateSpace::new(&[0.5, -0.3], &[0.4]);
        let rrt = ss.rrt();
        let r_vec = ss.r_vec();
        for i in 0..ss.dim() {
            for j in 0..ss.dim() {
                assert_abs_diff_eq!(rrt[[i, j]], r_vec[i] * r_vec[j], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StateSpace>();
    }
}
