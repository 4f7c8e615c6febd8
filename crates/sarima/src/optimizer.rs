//! Maximum-likelihood fitting via L-BFGS.
//!
//! Minimizes the negative concentrated log-likelihood over unconstrained
//! PACF parameters (see [`crate::params`]), so every iterate corresponds
//! to a stationary/invertible coefficient set by construction. Gradients
//! come from [`crate::numdiff`]. Filter divergence maps to a large finite
//! penalty so the line search steers away from it.
//!
//! **Not part of the public API.**

use argmin::core::{
    CostFunction, Executor, Gradient, TerminationReason, TerminationStatus,
};
use argmin::solver::linesearch::MoreThuenteLineSearch;
use argmin::solver::quasinewton::LBFGS;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use tracing::{debug, warn};

use janus_series::{TimeSeries, difference};

use crate::config::FitConfig;
use crate::error::SarimaError;
use crate::fit::SarimaFit;
use crate::kalman;
use crate::numdiff;
use crate::params::SarimaParams;
use crate::spec::SarimaSpec;
use crate::state_space::StateSpace;

/// Cost assigned to candidates whose filter run diverges. Finite, so the
/// finite-difference gradient stays bounded next to the divergence region.
const INFEASIBLE_COST: f64 = 1e10;

/// Number of correction pairs retained by L-BFGS.
const LBFGS_MEMORY: usize = 7;

/// Standard deviation of the perturbation applied to the starting point
/// on each random restart.
const RESTART_SPREAD: f64 = 0.5;

/// Fits a SARIMA specification to a series via exact MLE.
///
/// The full pipeline:
/// 1. Validate spec, config, and series length
/// 2. Difference and centre (subtract mean)
/// 3. Optimize the concentrated log-likelihood via L-BFGS, optionally
///    from several deterministically perturbed starting points
/// 4. Extract final coefficients and terminal state via a full Kalman pass
pub(crate) fn fit_sarima(
    spec: &SarimaSpec,
    series: &TimeSeries,
    config: &FitConfig,
) -> Result<SarimaFit, SarimaError> {
    spec.validate()?;
    config.validate()?;

    let n = series.len();
    let min = spec.min_observations();
    if n < min {
        return Err(SarimaError::InsufficientData { n, min });
    }

    let (d, big_d, s) = (spec.d(), spec.seasonal_d(), spec.period());
    let differenced = difference(series.values(), d, big_d, s)?;

    let mean = differenced.iter().sum::<f64>() / differenced.len() as f64;
    let centered: Vec<f64> = differenced.iter().map(|x| x - mean).collect();

    let min_val = centered.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_val = centered.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if (max_val - min_val).abs() < f64::EPSILON {
        return Err(SarimaError::ConstantData);
    }

    let theta0 = starting_point(spec, config)?;
    let cost = SarimaCost {
        data: &centered,
        spec,
        kappa: config.diffuse_kappa(),
    };

    let mut best = run_lbfgs(&cost, theta0.clone(), config)?;
    for restart in 1..=config.random_restarts() {
        let mut rng = StdRng::seed_from_u64(restart as u64);
        let noise = Normal::new(0.0, RESTART_SPREAD).expect("valid spread");
        let start: Vec<f64> = theta0.iter().map(|t| t + noise.sample(&mut rng)).collect();
        let candidate = run_lbfgs(&cost, start, config)?;
        if candidate.cost < best.cost {
            best = candidate;
        }
    }

    if !best.cost.is_finite() || best.cost >= INFEASIBLE_COST {
        return Err(SarimaError::OptimizationFailed);
    }
    if !best.converged {
        warn!(
            neg_loglik = best.cost,
            "optimisation did not converge; returning best iterate"
        );
    }

    let params = SarimaParams::from_unconstrained(&best.theta, spec);
    let ss = StateSpace::from_params(&params, s);
    let output = kalman::filter_full(&ss, &centered, config.diffuse_kappa())
        .map_err(|_| SarimaError::OptimizationFailed)?;

    debug!(
        log_likelihood = output.log_likelihood,
        sigma2 = output.sigma2,
        converged = best.converged,
        "fit complete"
    );

    let tail_len = d + big_d * s + 1;
    let history_tail = series.values()[n - tail_len..].to_vec();

    Ok(SarimaFit::new(
        *spec,
        params,
        output,
        mean,
        best.converged,
        history_tail,
        series.last_date(),
        series.step_days(),
        config.confidence_level(),
    ))
}

/// Unconstrained starting vector: the user's coefficient guess mapped
/// through the inverse PACF transform, or the origin.
fn starting_point(spec: &SarimaSpec, config: &FitConfig) -> Result<Vec<f64>, SarimaError> {
    let Some(guess) = config.initial_guess() else {
        return Ok(vec![0.0; spec.n_params()]);
    };
    if guess.len() != spec.n_params() {
        return Err(SarimaError::InvalidConfig {
            reason: format!(
                "initial guess has {} coefficients, specification needs {}",
                guess.len(),
                spec.n_params()
            ),
        });
    }
    let (p, q, sp) = (spec.p(), spec.q(), spec.seasonal_p());
    let params = SarimaParams {
        ar: guess[..p].to_vec(),
        ma: guess[p..p + q].to_vec(),
        seasonal_ar: guess[p + q..p + q + sp].to_vec(),
        seasonal_ma: guess[p + q + sp..].to_vec(),
    };
    params.to_unconstrained()
}

/// Outcome of one solver run.
struct Candidate {
    theta: Vec<f64>,
    cost: f64,
    converged: bool,
}

/// Runs L-BFGS from one starting point. A solver abort (for example a
/// failed line search) is non-fatal: the starting point is kept as the
/// candidate, flagged as non-converged.
fn run_lbfgs(
    cost: &SarimaCost<'_>,
    theta0: Vec<f64>,
    config: &FitConfig,
) -> Result<Candidate, SarimaError> {
    let linesearch = MoreThuenteLineSearch::new();
    let solver = LBFGS::new(linesearch, LBFGS_MEMORY)
        .with_tolerance_cost(config.convergence_tolerance())
        .map_err(|_| SarimaError::OptimizationFailed)?;

    let executor = Executor::new(cost.clone(), solver).configure(|state| {
        state
            .param(theta0.clone())
            .max_iters(config.max_iterations())
    });

    match executor.run() {
        Ok(result) => {
            let state = result.state();
            let theta = state
                .best_param
                .clone()
                .unwrap_or_else(|| theta0.clone());
            let converged = matches!(
                state.termination_status,
                TerminationStatus::Terminated(
                    TerminationReason::SolverConverged | TerminationReason::TargetCostReached
                )
            );
            Ok(Candidate {
                theta,
                cost: state.best_cost,
                converged,
            })
        }
        Err(err) => {
            warn!(error = %err, "solver aborted; keeping its starting point");
            let start_cost = cost.value(&theta0);
            Ok(Candidate {
                theta: theta0,
                cost: start_cost,
                converged: false,
            })
        }
    }
}

/// Cost function for argmin: negative concentrated log-likelihood over
/// unconstrained parameters.
#[derive(Clone)]
struct SarimaCost<'a> {
    data: &'a [f64],
    spec: &'a SarimaSpec,
    kappa: f64,
}

impl SarimaCost<'_> {
    fn value(&self, theta: &[f64]) -> f64 {
        let params = SarimaParams::from_unconstrained(theta, self.spec);
        let ss = StateSpace::from_params(&params, self.spec.period());
        match kalman::concentrated_loglik(&ss, self.data, self.kappa) {
            Ok(loglik) if loglik.is_finite() => -loglik,
            _ => INFEASIBLE_COST,
        }
    }
}

impl CostFunction for SarimaCost<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        Ok(self.value(theta))
    }
}

impl Gradient for SarimaCost<'_> {
    type Param = Vec<f64>;
    type Gradient = Vec<f64>;

    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, argmin::core::Error> {
        Ok(numdiff::central_gradient(|x| self.value(x), theta))
    }
}
