//! series::align — intersect two date-indexed series on shared time keys.
//!
//! Purpose
//! -------
//! Pair same-date observations from a response and an explanatory series so
//! that downstream regressions compare like with like. Sources rarely share
//! the same coverage or cadence (weekly vs daily reporting, gaps around
//! holidays), so only keys present in both inputs survive.
//!
//! Key behaviors
//! -------------
//! - [`align`] performs a single-pass two-pointer merge intersection and
//!   returns [`AlignedPair`]s in ascending time order.
//! - [`AlignedSeries`] splits the pairs back into parallel point vectors and
//!   `Array1<f64>` value arrays, which is the shape the lag engine consumes.
//!
//! Invariants & assumptions
//! ------------------------
//! - Both inputs are strictly ascending by `time`. This is a precondition,
//!   not a check: unsorted input yields an unspecified (but non-panicking)
//!   result. Use [`TimeSeries`](crate::series::point::TimeSeries) to have it
//!   enforced.
//! - Output length ≤ min(|a|, |b|) and output keys are strictly ascending.
//!
//! Performance
//! -----------
//! - O(|a| + |b|) time, one allocation for the output vector (capacity
//!   min(|a|, |b|)).
//!
//! Testing notes
//! -------------
//! - Unit tests cover disjoint, identical, interleaved, and partially
//!   overlapping inputs, plus the split performed by `AlignedSeries`.
use std::cmp::Ordering;

use ndarray::Array1;

use crate::series::point::TimePoint;

/// Which side of an aligned pair a value came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeriesRole {
    Response,
    Explanatory,
}

impl std::fmt::Display for SeriesRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesRole::Response => write!(f, "response"),
            SeriesRole::Explanatory => write!(f, "explanatory"),
        }
    }
}

/// `AlignedPair` — same-date observations from the response and explanatory
/// series.
///
/// Invariants
/// ----------
/// - `response.time == explanatory.time`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignedPair {
    pub response: TimePoint,
    pub explanatory: TimePoint,
}

impl AlignedPair {
    /// Shared time key of both observations.
    pub fn time(&self) -> i64 {
        self.response.time
    }
}

/// Intersect two ascending series on their shared time keys.
///
/// Parameters
/// ----------
/// - `a`: `&[TimePoint]`
///   Response-side series, strictly ascending by `time`.
/// - `b`: `&[TimePoint]`
///   Explanatory-side series, strictly ascending by `time`.
///
/// Returns
/// -------
/// `Vec<AlignedPair>`
///   One pair per key present in both inputs, in ascending key order, with
///   `a`'s point as `response` and `b`'s point as `explanatory`.
///
/// Panics
/// ------
/// - Never panics, including on unsorted input.
///
/// Examples
/// --------
/// ```rust
/// # use rust_lagcorr::series::{align::align, point::TimePoint};
/// let a = [TimePoint::new(1, 10.0), TimePoint::new(2, 20.0), TimePoint::new(4, 40.0)];
/// let b = [TimePoint::new(2, 0.2), TimePoint::new(3, 0.3), TimePoint::new(4, 0.4)];
///
/// let pairs = align(&a, &b);
/// let times: Vec<i64> = pairs.iter().map(|p| p.time()).collect();
/// assert_eq!(times, vec![2, 4]);
/// ```
pub fn align(a: &[TimePoint], b: &[TimePoint]) -> Vec<AlignedPair> {
    let mut pairs = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0_usize, 0_usize);

    while i < a.len() && j < b.len() {
        match a[i].time.cmp(&b[j].time) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                pairs.push(AlignedPair { response: a[i], explanatory: b[j] });
                i += 1;
                j += 1;
            }
        }
    }
    pairs
}

/// `AlignedSeries` — aligned pairs split into parallel arrays.
///
/// Purpose
/// -------
/// Hold the response and explanatory sides of an alignment as separate,
/// equally long vectors so lag windows can be taken as index ranges over
/// immutable data.
///
/// Fields
/// ------
/// - `response_points`, `explanatory_points`: `Vec<TimePoint>`
///   The aligned observations, index-for-index on the same key.
/// - `response_values`, `explanatory_values`: `Array1<f64>`
///   The same observations' values, used directly by the regression.
///
/// Invariants
/// ----------
/// - All four collections have the same length `n`.
/// - `response_points[i].time == explanatory_points[i].time`, strictly
///   ascending in `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeries {
    response_points: Vec<TimePoint>,
    explanatory_points: Vec<TimePoint>,
    response_values: Array1<f64>,
    explanatory_values: Array1<f64>,
}

impl AlignedSeries {
    /// Align `response` against `explanatory` and split the result.
    pub fn new(response: &[TimePoint], explanatory: &[TimePoint]) -> Self {
        AlignedSeries::from_pairs(&align(response, explanatory))
    }

    /// Split already-aligned pairs into parallel arrays.
    pub fn from_pairs(pairs: &[AlignedPair]) -> Self {
        let response_points: Vec<TimePoint> = pairs.iter().map(|p| p.response).collect();
        let explanatory_points: Vec<TimePoint> = pairs.iter().map(|p| p.explanatory).collect();
        let response_values = response_points.iter().map(|p| p.value).collect();
        let explanatory_values = explanatory_points.iter().map(|p| p.value).collect();

        AlignedSeries { response_points, explanatory_points, response_values, explanatory_values }
    }

    /// Number of aligned samples `n`.
    pub fn len(&self) -> usize {
        self.response_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.response_points.is_empty()
    }

    pub fn points(&self, role: SeriesRole) -> &[TimePoint] {
        match role {
            SeriesRole::Response => &self.response_points,
            SeriesRole::Explanatory => &self.explanatory_points,
        }
    }

    pub fn values(&self, role: SeriesRole) -> &Array1<f64> {
        match role {
            SeriesRole::Response => &self.response_values,
            SeriesRole::Explanatory => &self.explanatory_values,
        }
    }

    /// Rebuild the aligned pairs.
    pub fn pairs(&self) -> Vec<AlignedPair> {
        self.response_points
            .iter()
            .zip(&self.explanatory_points)
            .map(|(&response, &explanatory)| AlignedPair { response, explanatory })
            .collect()
    }
}
