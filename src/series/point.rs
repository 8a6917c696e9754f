//! Time points and validated series containers.
//!
//! Purpose
//! -------
//! Define the value type every other module exchanges ([`TimePoint`]) and a
//! small validated container ([`TimeSeries`]) for callers that want the
//! ordering precondition of the aligner checked up front instead of assumed.
//!
//! Key behaviors
//! -------------
//! - [`TimePoint`] is a plain `Copy` pair of an integer time key and an
//!   `f64` observation.
//! - [`TimeSeries`] enforces finite values and strictly ascending keys at
//!   construction and exposes the values as an `ndarray::Array1<f64>`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Time keys are opaque integers: either YYYYMMDD date keys or epoch days
//!   (see [`calendar`](crate::series::calendar)). Both encodings are
//!   monotone in calendar order, which is all the aligner relies on.
//! - A `TimeSeries` is never mutated after construction.
//!
//! Conventions
//! -----------
//! - Raw slices of `TimePoint` are accepted everywhere; `TimeSeries`
//!   dereferences to `[TimePoint]` so it can be passed where a slice is
//!   expected.
//!
//! Testing notes
//! -------------
//! - Unit tests cover `TimeSeries::new`, `TimeSeries::from_parts`, and the
//!   accessors on a small series.
use std::ops::Deref;

use ndarray::Array1;

use crate::series::{
    errors::{SeriesError, SeriesResult},
    validation::{validate_ascending, validate_finite},
};

/// `TimePoint` — one observation of a date-indexed signal.
///
/// Fields
/// ------
/// - `time`: `i64`
///   Date key (YYYYMMDD) or epoch day. Only its ordering is used.
/// - `value`: `f64`
///   Observed value at `time`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimePoint {
    /// Date key or epoch day.
    pub time: i64,
    /// Observed value.
    pub value: f64,
}

impl TimePoint {
    pub fn new(time: i64, value: f64) -> Self {
        TimePoint { time, value }
    }
}

impl From<(i64, f64)> for TimePoint {
    fn from((time, value): (i64, f64)) -> Self {
        TimePoint { time, value }
    }
}

/// `TimeSeries` — finite, strictly ascending sequence of [`TimePoint`]s.
///
/// Purpose
/// -------
/// Carry a series whose ordering and finiteness have already been checked,
/// so the aligner's precondition holds by construction.
///
/// Invariants
/// ----------
/// - Every `value` is finite.
/// - `points[i].time < points[i + 1].time` for all valid `i`.
/// - May be empty; emptiness is not an error at this layer because the
///   engine reports insufficient data with the exact counts.
/// - With `serde`, a series is (de)serialized as a plain list of points and
///   deserialization runs the same checks as [`TimeSeries::new`].
///
/// Performance
/// -----------
/// - Construction is a single O(n) scan per guard; accessors other than
///   [`values`](Self::values) and [`times`](Self::times) do not allocate.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<TimePoint>", into = "Vec<TimePoint>")
)]
pub struct TimeSeries {
    points: Vec<TimePoint>,
}

impl TimeSeries {
    /// Validate and wrap a vector of points.
    ///
    /// Errors
    /// ------
    /// - `SeriesError::NonFiniteValue { index, value }`
    ///   Returned for the first NaN or ±∞ value.
    /// - `SeriesError::NotAscending { index, previous, current }`
    ///   Returned for the first key that does not strictly exceed its
    ///   predecessor.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_lagcorr::series::point::{TimePoint, TimeSeries};
    /// let series = TimeSeries::new(vec![
    ///     TimePoint::new(20200101, 1.0),
    ///     TimePoint::new(20200102, 2.0),
    /// ]).unwrap();
    /// assert_eq!(series.len(), 2);
    /// ```
    pub fn new(points: Vec<TimePoint>) -> SeriesResult<Self> {
        validate_finite(&points)?;
        validate_ascending(&points)?;
        Ok(TimeSeries { points })
    }

    /// Build a series from parallel time and value slices.
    ///
    /// Errors
    /// ------
    /// - `SeriesError::LengthMismatch { times, values }` when the slices
    ///   differ in length, then any error of [`TimeSeries::new`].
    pub fn from_parts(times: &[i64], values: &[f64]) -> SeriesResult<Self> {
        if times.len() != values.len() {
            return Err(SeriesError::LengthMismatch { times: times.len(), values: values.len() });
        }
        let points = times.iter().zip(values).map(|(&t, &v)| TimePoint::new(t, v)).collect();
        TimeSeries::new(points)
    }

    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<TimePoint> {
        self.points
    }

    /// Observed values in time order.
    pub fn values(&self) -> Array1<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Time keys in ascending order.
    pub fn times(&self) -> Vec<i64> {
        self.points.iter().map(|p| p.time).collect()
    }

    /// First and last time key, or `None` for an empty series.
    pub fn span(&self) -> Option<(i64, i64)> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => Some((first.time, last.time)),
            _ => None,
        }
    }
}

impl TryFrom<Vec<TimePoint>> for TimeSeries {
    type Error = SeriesError;

    fn try_from(points: Vec<TimePoint>) -> SeriesResult<Self> {
        TimeSeries::new(points)
    }
}

impl From<TimeSeries> for Vec<TimePoint> {
    fn from(series: TimeSeries) -> Self {
        series.points
    }
}

impl Deref for TimeSeries {
    type Target = [TimePoint];

    fn deref(&self) -> &[TimePoint] {
        &self.points
    }
}
