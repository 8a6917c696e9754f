//! series::errors — validation errors for date-indexed series.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used when constructing validated
//! series containers and converting calendar keys. Keeping these separate
//! from the correlation errors lets the series layer be reused on its own
//! (e.g., by a data-source collaborator that only needs alignment).
//!
//! Key behaviors
//! -------------
//! - Define [`SeriesError`] and [`SeriesResult`] as the canonical error and
//!   result types for `series::{point, validation, calendar}`.
//! - Attach human-readable `Display` messages that embed the offending
//!   index, time key, or value.
//! - Implement `From<SeriesError> for PyErr` when the `python-bindings`
//!   feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - Validation helpers return the *first* violation they encounter; the
//!   payload always points at that element.
//! - `SeriesError` values are small and cheap to clone.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that each variant's `Display` message embeds its
//!   payload.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type SeriesResult<T> = Result<T, SeriesError>;

/// SeriesError — validation failures for time-indexed series.
///
/// Variants
/// --------
/// - `NonFiniteValue { index, value }`
///   The observation at `index` is NaN or ±∞.
/// - `NotAscending { index, previous, current }`
///   The time key at `index` is not strictly greater than its predecessor
///   (duplicates count as a violation).
/// - `LengthMismatch { times, values }`
///   Parallel time and value slices have different lengths.
/// - `InvalidDateKey { key }`
///   A YYYYMMDD key does not name a real calendar date.
/// - `EpochDayOutOfRange { day }`
///   An epoch-day offset falls outside the representable calendar range.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesError {
    // ---- Point validation ----
    NonFiniteValue { index: usize, value: f64 },
    NotAscending { index: usize, previous: i64, current: i64 },
    LengthMismatch { times: usize, values: usize },

    // ---- Calendar keys ----
    InvalidDateKey { key: i64 },
    EpochDayOutOfRange { day: i64 },
}

impl std::error::Error for SeriesError {}

impl std::fmt::Display for SeriesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesError::NonFiniteValue { index, value } => {
                write!(f, "Observation at index {index} is non-finite: {value}")
            }
            SeriesError::NotAscending { index, previous, current } => {
                write!(
                    f,
                    "Time keys must be strictly ascending; index {index} has {current} after {previous}"
                )
            }
            SeriesError::LengthMismatch { times, values } => {
                write!(f, "Times and values must have equal length: {times} times, {values} values")
            }
            SeriesError::InvalidDateKey { key } => {
                write!(f, "Date key {key} is not a valid YYYYMMDD calendar date")
            }
            SeriesError::EpochDayOutOfRange { day } => {
                write!(f, "Epoch day {day} is outside the supported calendar range")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<SeriesError> for PyErr {
    fn from(err: SeriesError) -> PyErr {
        PyValueError::new_err(format!("SeriesError: {err}"))
    }
}
