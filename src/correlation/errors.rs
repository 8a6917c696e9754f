//! correlation::errors — failure modes of the lag correlation engine.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for lag correlation runs. The
//! engine is a pure function of its inputs, so every error here is a
//! precondition failure reported *before* any regression is attempted and
//! is never retried. `MalformedReport` is the exception: it guards
//! deserialized reports.
//!
//! Key behaviors
//! -------------
//! - Define [`CorrelationError`] and [`CorrelationResult`].
//! - Attach `Display` messages that name the actual and required counts for
//!   insufficient data, so a presentation layer can show them verbatim.
//! - Wrap [`SeriesError`] via `From` so raw-column entry points can
//!   validate series with a single `?` chain.
//! - Implement `From<CorrelationError> for PyErr` behind
//!   `python-bindings`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `InsufficientData { actual, required }` always has `actual < required`.
//! - `DegenerateRegression { lag }` is only produced under
//!   `DegeneratePolicy::Error`; the default policy maps degenerate windows
//!   to a documented sentinel instead.
//!
//! Testing notes
//! -------------
//! - Unit tests verify payload embedding in each `Display` message and the
//!   `From<SeriesError>` conversion.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::series::{SeriesRole, errors::SeriesError};

pub type CorrelationResult<T> = Result<T, CorrelationError>;

/// CorrelationError — reasons a lag correlation run can fail.
///
/// Variants
/// --------
/// - `InsufficientData { actual, required }`
///   The aligned sample count `actual` is below `required`
///   (`max(2 · max_lag, 1)`). Recoverable by shrinking `max_lag` or
///   requesting a wider date range.
/// - `DegenerateRegression { lag }`
///   The fixed window at `lag` has zero variance and the options ask for
///   an error rather than a sentinel.
/// - `NonFiniteValue { series, time, value }`
///   An aligned observation is NaN or ±∞.
/// - `MalformedReport { max_lag, lag_count }`
///   A deserialized report whose lags are not `0, 1, …, L, −1, …, −L`.
/// - `Series(SeriesError)`
///   Raw time/value columns failed series validation.
#[derive(Debug, Clone, PartialEq)]
pub enum CorrelationError {
    // ---- Preconditions ----
    InsufficientData { actual: usize, required: usize },
    NonFiniteValue { series: SeriesRole, time: i64, value: f64 },

    // ---- Regression ----
    DegenerateRegression { lag: i64 },

    // ---- Reports ----
    MalformedReport { max_lag: usize, lag_count: usize },

    // ---- Wrapped ----
    Series(SeriesError),
}

impl std::error::Error for CorrelationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CorrelationError::Series(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for CorrelationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrelationError::InsufficientData { actual, required } => {
                write!(
                    f,
                    "Insufficient data: {actual} aligned samples, at least {required} required."
                )
            }
            CorrelationError::NonFiniteValue { series, time, value } => {
                write!(f, "Aligned {series} value at time {time} is non-finite: {value}")
            }
            CorrelationError::DegenerateRegression { lag } => {
                write!(f, "Degenerate regression at lag {lag}: fixed window has zero variance.")
            }
            CorrelationError::MalformedReport { max_lag, lag_count } => {
                write!(
                    f,
                    "Malformed report: {lag_count} lag results do not follow generation order for max_lag {max_lag}."
                )
            }
            CorrelationError::Series(err) => write!(f, "{err}"),
        }
    }
}

impl From<SeriesError> for CorrelationError {
    fn from(err: SeriesError) -> Self {
        CorrelationError::Series(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<CorrelationError> for PyErr {
    fn from(err: CorrelationError) -> PyErr {
        PyValueError::new_err(format!("CorrelationError: {err}"))
    }
}
