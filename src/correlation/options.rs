//! Correlation options — run configuration for the lag engine.
//!
//! Purpose
//! -------
//! Collect the knobs of a lag correlation run in one value so call sites pass
//! an explicit configuration instead of loose arguments: the maximum lag, the
//! policy for degenerate regression windows, and verbosity of the optional
//! slog observer.
//!
//! Key behaviors
//! -------------
//! - [`CorrelationOptions`] bundles `max_lag`, `degenerate` and `verbose`,
//!   with `Default` matching the dashboard's standard 28-day window.
//! - [`DegeneratePolicy`] selects between a sentinel r² and a hard error when
//!   the fixed window of a lag has zero variance.
//! - [`CorrelationOptions::required_samples`] derives the minimum aligned
//!   sample count from `max_lag`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Any `max_lag` is accepted here, including 0. Whether the data supports
//!   it is decided by the engine against the aligned sample count.
//! - `verbose` has no effect unless the crate is built with `obs_slog`.
//!
//! Testing notes
//! -------------
//! - Unit tests check defaults, builder methods and `required_samples`.

/// Default maximum lag, in aligned samples (four weeks of daily data).
pub const DEFAULT_MAX_LAG: usize = 28;

/// Policy for lag windows whose fixed series has zero variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DegeneratePolicy {
    /// Report the flat fit (`slope = 0`, `intercept = y₀`) with `r2 = 1.0`
    /// when it reproduces the window exactly, `r2 = 0.0` otherwise (default).
    #[default]
    Sentinel,

    /// Fail the whole run with `CorrelationError::DegenerateRegression`.
    Error,
}

/// CorrelationOptions — configuration of a single lag correlation run.
///
/// Fields
/// ------
/// - `max_lag`: `usize`
///   Largest absolute lag L; the engine evaluates every lag in `[-L, L]`.
/// - `degenerate`: [`DegeneratePolicy`]
///   What to do when a fixed window is constant.
/// - `verbose`: `bool`
///   Emit per-lag structured log lines through slog (`obs_slog` feature).
///
/// Notes
/// -----
/// - Small and `Copy`; pass by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CorrelationOptions {
    pub max_lag: usize,
    pub degenerate: DegeneratePolicy,
    pub verbose: bool,
}

impl CorrelationOptions {
    pub fn new(max_lag: usize, degenerate: DegeneratePolicy, verbose: bool) -> Self {
        CorrelationOptions { max_lag, degenerate, verbose }
    }

    pub fn with_max_lag(mut self, max_lag: usize) -> Self {
        self.max_lag = max_lag;
        self
    }

    pub fn with_degenerate(mut self, degenerate: DegeneratePolicy) -> Self {
        self.degenerate = degenerate;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Minimum aligned sample count for this configuration.
    ///
    /// Equals `2 · max_lag`, floored at 1 so that every lag window holds at
    /// least one sample when `max_lag == 0`.
    pub fn required_samples(&self) -> usize {
        self.max_lag.saturating_mul(2).max(1)
    }

    /// Number of lags evaluated, `2 · max_lag + 1`.
    pub fn lag_count(&self) -> usize {
        self.max_lag.saturating_mul(2).saturating_add(1)
    }
}

impl Default for CorrelationOptions {
    fn default() -> Self {
        CorrelationOptions {
            max_lag: DEFAULT_MAX_LAG,
            degenerate: DegeneratePolicy::default(),
            verbose: false,
        }
    }
}
