//! correlation::window — index ranges for each lag's regression windows.
//!
//! Purpose
//! -------
//! Translate a lag into the pair of index ranges over the aligned arrays
//! that enter its regression. Windows are plain `Range<usize>` values, so
//! the engine slices immutable arrays instead of copying or mutating them.
//!
//! Key behaviors
//! -------------
//! - [`generation_order`] yields lags `0, 1, …, L, −1, −2, …, −L`, the order
//!   in which results are produced, stored and tie-broken.
//! - [`LagWindow::new`] builds the response and explanatory ranges for one
//!   lag; [`lag_windows`] builds all of them in generation order.
//!
//! Invariants & assumptions
//! ------------------------
//! - With `n` aligned samples and maximum lag `L` (`n ≥ L`), every window
//!   has exactly `n − L` samples.
//! - Lag `k ≥ 0`: response is the fixed base `[L, n)`, explanatory is the
//!   variable `[L − k, n − k)`; explanatory leads the response by `k`.
//! - Lag `−k`: response is the variable `[L − k, n − k)`, explanatory is the
//!   fixed base `[L, n)`; the response leads the explanatory by `k`.
//!
//! Testing notes
//! -------------
//! - Unit tests check the generation order, the equal-length invariant, and
//!   the concrete ranges at the extreme lags.
use std::ops::Range;

/// Lags `0..=max_lag` followed by `-1..=-max_lag`.
pub fn generation_order(max_lag: usize) -> impl Iterator<Item = i64> {
    let max = max_lag as i64;
    (0..=max).chain((1..=max).map(|k| -k))
}

/// LagWindow — index ranges paired at one lag.
///
/// Fields
/// ------
/// - `lag`: `i64`
///   Signed lag; positive when the explanatory series leads.
/// - `response`, `explanatory`: `Range<usize>`
///   Index ranges into the aligned response and explanatory arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LagWindow {
    pub lag: i64,
    pub response: Range<usize>,
    pub explanatory: Range<usize>,
}

impl LagWindow {
    /// Ranges for `lag` over `n` aligned samples with maximum lag `max_lag`.
    ///
    /// Panics
    /// ------
    /// - Debug builds assert `|lag| ≤ max_lag ≤ n`; the engine checks the
    ///   sample count before building any window.
    pub fn new(lag: i64, n: usize, max_lag: usize) -> Self {
        let shift = lag.unsigned_abs() as usize;
        debug_assert!(shift <= max_lag && max_lag <= n, "lag window out of bounds");

        let base = max_lag..n;
        let shifted = (max_lag - shift)..(n - shift);
        if lag >= 0 {
            LagWindow { lag, response: base, explanatory: shifted }
        } else {
            LagWindow { lag, response: shifted, explanatory: base }
        }
    }

    /// Whether the response side is the fixed base window.
    pub fn response_is_fixed(&self) -> bool {
        self.lag >= 0
    }

    /// Samples in each side of the window.
    pub fn len(&self) -> usize {
        self.response.len()
    }

    pub fn is_empty(&self) -> bool {
        self.response.is_empty()
    }
}

/// All windows for a run, in generation order.
pub fn lag_windows(n: usize, max_lag: usize) -> Vec<LagWindow> {
    generation_order(max_lag).map(|lag| LagWindow::new(lag, n, max_lag)).collect()
}
