//! Error types for the janus-series crate.

/// Error type for time-series construction and differencing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SeriesError {
    /// Returned when the input series is empty.
    #[error("time series is empty")]
    Empty,

    /// Returned when dates and values have different lengths.
    #[error("dates and values differ in length: {dates} dates vs {values} values")]
    LengthMismatch {
        /// Number of dates provided.
        dates: usize,
        /// Number of values provided.
        values: usize,
    },

    /// Returned when a value is NaN or infinite.
    #[error("value at index {index} is not finite")]
    NonFinite {
        /// Index of the offending value.
        index: usize,
    },

    /// Returned when timestamps are not strictly increasing.
    #[error("timestamps are not strictly increasing at index {index}")]
    NonIncreasing {
        /// Index of the first out-of-order timestamp.
        index: usize,
    },

    /// Returned when the sampling interval is not uniform.
    #[error("irregular sampling interval at index {index}: expected {expected} days, got {got} days")]
    IrregularSpacing {
        /// Index at which the deviating interval starts.
        index: usize,
        /// Interval implied by the first two dates, in days.
        expected: i64,
        /// Interval actually observed, in days.
        got: i64,
    },

    /// Returned when a seasonal operation is requested with period zero.
    #[error("seasonal period must be at least 1")]
    ZeroPeriod,

    /// Returned when the series is too short for the requested differencing.
    #[error("insufficient history: got {n} values, need at least {min}")]
    InsufficientHistory {
        /// Number of values provided.
        n: usize,
        /// Minimum number of values required.
        min: usize,
    },
}
