//! correlation::report — per-lag results and the report bundle.
//!
//! Purpose
//! -------
//! Define the values a lag correlation run produces: one [`LagResult`] per
//! evaluated lag and a [`CorrelationReport`] bundling all of them with the
//! lag-0 and best-lag headlines the presentation layer displays.
//!
//! Key behaviors
//! -------------
//! - `CorrelationReport::all_lags` keeps **generation order**
//!   (`0, 1, …, L, −1, …, −L`); this order is part of the contract and is
//!   what snapshot-style consumers see. [`CorrelationReport::sorted_by_lag`]
//!   and [`CorrelationReport::r2_curve`] provide lag-sorted views for
//!   charting.
//! - The best lag is the first lag in generation order whose r² equals the
//!   maximum, i.e. non-negative lags win ties against negative ones and
//!   smaller |lag| wins within each branch.
//!
//! Invariants & assumptions
//! ------------------------
//! - `all_lags.len() == 2 · max_lag + 1` and `all_lags[0].lag == 0`.
//! - Every `LagResult::sample_count` is identical.
//! - `r2_at_best_lag == max(r2)` over `all_lags`.
//!
//! Testing notes
//! -------------
//! - Unit tests build reports from hand-made `LagResult`s to pin the
//!   tie-break and the sorted views; the engine tests exercise the real
//!   construction path.
use crate::{
    correlation::{
        errors::{CorrelationError, CorrelationResult},
        window::generation_order,
    },
    series::point::TimePoint,
};

/// LagResult — regression statistics for one lag.
///
/// Fields
/// ------
/// - `lag`: `i64`
///   Signed lag; positive when the explanatory series leads the response.
/// - `r2`: `f64`
///   Coefficient of determination in `[0, 1]`.
/// - `slope`, `intercept`: `f64`
///   Coefficients of `fixed = slope · variable + intercept`.
/// - `r`: `f64`
///   Signed Pearson correlation of the two windows.
/// - `p_value`: `Option<f64>`
///   Two-sided p-value for a zero slope; `None` when undefined.
/// - `sample_count`: `usize`
///   Points entering the regression (`n − max_lag`).
/// - `response_window`, `explanatory_window`: `Vec<TimePoint>`
///   The aligned observations paired at this lag, index-for-index.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LagResult {
    pub lag: i64,
    pub r2: f64,
    pub slope: f64,
    pub intercept: f64,
    pub r: f64,
    pub p_value: Option<f64>,
    pub sample_count: usize,
    pub response_window: Vec<TimePoint>,
    pub explanatory_window: Vec<TimePoint>,
}

/// CorrelationReport — outcome of a lag correlation run.
///
/// Purpose
/// -------
/// Bundle every per-lag result with the two headline figures (r² at lag 0
/// and at the best lag) so callers can render a lag-vs-r² chart and a
/// "best lag" statistic without rescanning.
///
/// Fields
/// ------
/// - `max_lag`: `usize`
///   L used for the run.
/// - `r2_at_lag_zero`, `r2_at_best_lag`: `f64`
///   Headline r² values.
/// - `best_lag`: `i64`
///   First lag in generation order attaining the maximal r².
/// - `best_index`: `usize`
///   Position of the best lag inside `all_lags`.
/// - `all_lags`: `Vec<LagResult>`
///   All `2L + 1` results in generation order.
///
/// Notes
/// -----
/// - Immutable after construction; equality is value equality, so two runs
///   on identical input compare equal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CorrelationReport {
    max_lag: usize,
    r2_at_lag_zero: f64,
    best_lag: i64,
    r2_at_best_lag: f64,
    best_index: usize,
    all_lags: Vec<LagResult>,
}

impl CorrelationReport {
    /// Assemble a report from results in generation order.
    ///
    /// Callers guarantee `all_lags` is non-empty and starts at lag 0, which
    /// holds for every run produced by the engine.
    pub(crate) fn from_lag_results(max_lag: usize, all_lags: Vec<LagResult>) -> Self {
        debug_assert!(all_lags.first().is_some_and(|l| l.lag == 0), "lag 0 must come first");

        let best_index = best_lag_index(&all_lags);
        let r2_at_lag_zero = all_lags.first().map_or(f64::NAN, |l| l.r2);
        let (best_lag, r2_at_best_lag) =
            all_lags.get(best_index).map_or((0, f64::NAN), |l| (l.lag, l.r2));

        CorrelationReport { max_lag, r2_at_lag_zero, best_lag, r2_at_best_lag, best_index, all_lags }
    }

    /// Like [`from_lag_results`](Self::from_lag_results), for results that
    /// did not come from the engine.
    ///
    /// Errors
    /// ------
    /// - `CorrelationError::MalformedReport { max_lag, lag_count }`
    ///   The lags are not exactly `0, 1, …, L, −1, …, −L`.
    #[cfg_attr(not(feature = "serde"), allow(dead_code))]
    pub(crate) fn checked_from_lag_results(
        max_lag: usize, all_lags: Vec<LagResult>,
    ) -> CorrelationResult<Self> {
        if !all_lags.iter().map(|l| l.lag).eq(generation_order(max_lag)) {
            return Err(CorrelationError::MalformedReport { max_lag, lag_count: all_lags.len() });
        }
        Ok(CorrelationReport::from_lag_results(max_lag, all_lags))
    }

    pub fn max_lag(&self) -> usize {
        self.max_lag
    }

    pub fn r2_at_lag_zero(&self) -> f64 {
        self.r2_at_lag_zero
    }

    pub fn best_lag(&self) -> i64 {
        self.best_lag
    }

    pub fn r2_at_best_lag(&self) -> f64 {
        self.r2_at_best_lag
    }

    /// Result at lag 0.
    pub fn lag_zero(&self) -> &LagResult {
        &self.all_lags[0]
    }

    /// Result at the best lag.
    pub fn best_lag_result(&self) -> &LagResult {
        &self.all_lags[self.best_index]
    }

    /// All results in generation order `0, 1, …, L, −1, …, −L`.
    pub fn all_lags(&self) -> &[LagResult] {
        &self.all_lags
    }

    /// Samples per regression, shared by every lag.
    pub fn sample_count(&self) -> usize {
        self.lag_zero().sample_count
    }

    /// Result for a specific signed lag, if it was evaluated.
    pub fn lag(&self, lag: i64) -> Option<&LagResult> {
        self.all_lags.iter().find(|l| l.lag == lag)
    }

    /// Results ordered by ascending lag (−L … L).
    pub fn sorted_by_lag(&self) -> Vec<&LagResult> {
        let mut sorted: Vec<&LagResult> = self.all_lags.iter().collect();
        sorted.sort_by_key(|l| l.lag);
        sorted
    }

    /// `(lag, r2)` points ordered by ascending lag, for lag-vs-r² charts.
    pub fn r2_curve(&self) -> Vec<(i64, f64)> {
        self.sorted_by_lag().into_iter().map(|l| (l.lag, l.r2)).collect()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CorrelationReport {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Stored {
            max_lag: usize,
            all_lags: Vec<LagResult>,
        }

        let stored = Stored::deserialize(deserializer)?;
        CorrelationReport::checked_from_lag_results(stored.max_lag, stored.all_lags)
            .map_err(serde::de::Error::custom)
    }
}

/// Index of the first maximal r² in scan order.
///
/// Only a strictly greater r² replaces the current best, so ties keep the
/// earlier entry.
pub(crate) fn best_lag_index(results: &[LagResult]) -> usize {
    let mut best_index = 0;
    let mut best_r2 = f64::NEG_INFINITY;
    for (index, result) in results.iter().enumerate() {
        if result.r2 > best_r2 {
            best_r2 = result.r2;
            best_index = index;
        }
    }
    best_index
}
