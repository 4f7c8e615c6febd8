//! # janus-sarima
//!
//! SARIMA(p,d,q)(P,D,Q)_s model fitting and forecasting via state-space
//! maximum-likelihood (Kalman filter).
//!
//! ## Typestate Workflow
//!
//! ```mermaid
//! graph LR
//!     A["SarimaSpec::new(p, d, q)"] -->|".with_seasonal(P, D, Q, s)"| A
//!     A -->|".fit(&series)?"| B["SarimaFit"]
//!     B --> C[".ar() / .ma() / .seasonal_ar() / .seasonal_ma()"]
//!     B --> D[".sigma2() — innovation variance"]
//!     B --> E[".aic() — Akaike Information Criterion"]
//!     B -->|".forecast(horizon)?"| F["ForecastResult"]
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let spec = SarimaSpec::new(1, 1, 1).with_seasonal(1, 1, 1, 7);
//! let fit = spec.fit(&series)?;
//! let forecast = fit.forecast(50)?;
//! ```
//!
//! ## Mathematical Glossary
//!
//! | Symbol | Accessor | Meaning |
//! |--------|----------|---------|
//! | phi | [`SarimaFit::ar()`] | AR coefficients: weights on past observations |
//! | theta | [`SarimaFit::ma()`] | MA coefficients: weights on past forecast errors |
//! | Phi | [`SarimaFit::seasonal_ar()`] | seasonal AR coefficients at lag multiples of `s` |
//! | Theta | [`SarimaFit::seasonal_ma()`] | seasonal MA coefficients at lag multiples of `s` |
//! | sigma2 | [`SarimaFit::sigma2()`] | Innovation (white-noise) variance |
//! | AIC | [`SarimaFit::aic()`] | Akaike Information Criterion (lower = better) |

mod config;
mod error;
mod fit;
mod forecast;
mod spec;

pub(crate) mod interval;
pub(crate) mod kalman;
pub(crate) mod numdiff;
pub(crate) mod optimizer;
pub(crate) mod params;
pub(crate) mod state_space;

pub use config::FitConfig;
pub use error::SarimaError;
pub use fit::SarimaFit;
pub use forecast::{ForecastPoint, ForecastResult};
pub use spec::SarimaSpec;
