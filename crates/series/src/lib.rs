//! # janus-series
//!
//! Validated daily time-series container and differencing primitives for
//! the janus forecasting pipeline.
//!
//! The two jobs of this crate:
//!
//! - [`TimeSeries`] — an immutable, regularly sampled series of dated
//!   observations, validated once at the boundary so downstream numerics
//!   can assume finite values and uniform spacing.
//! - [`difference`] / [`undifference`] — non-seasonal and seasonal
//!   differencing and its exact algebraic inverse, used to move between
//!   the observed scale and the (assumed) stationary scale.

mod difference;
mod error;
mod timeseries;

pub use difference::{difference, undifference};
pub use error::SeriesError;
pub use timeseries::TimeSeries;
