//! correlation — lagged cross-correlation of a response and an explanatory
//! series.
//!
//! Purpose
//! -------
//! Quantify how strongly one date-indexed signal predicts another at time
//! offsets from −L to +L, and report the offset where a simple linear fit is
//! strongest. A typical use is asking how many days a leading indicator
//! (e.g. mobility or test positivity) runs ahead of case counts.
//!
//! Key behaviors
//! -------------
//! - [`compute_correlation`] / [`compute_correlation_with_options`] align
//!   the inputs, regress every lag window and return a
//!   [`CorrelationReport`].
//! - [`LagCorrelationEngine`] wraps a fixed [`CorrelationOptions`] for
//!   repeated runs.
//! - [`regression::fit_linear`] and [`significance::slope_p_value`] are the
//!   per-window numerics; [`window`] defines which samples each lag pairs.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every lag regresses exactly `n − L` samples, so r² values are
//!   comparable across lags.
//! - Results are kept in generation order `0, 1, …, L, −1, …, −L`; the best
//!   lag is the first maximal r² in that order.
//! - Runs are pure and deterministic; all errors are precondition failures
//!   raised before the first regression, except
//!   `DegenerateRegression` under the opt-in error policy.
//!
//! Conventions
//! -----------
//! - A positive lag means the explanatory series leads the response.
//! - Error handling uses [`CorrelationError`] and
//!   [`CorrelationResult<T>`](CorrelationResult).
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use rust_lagcorr::correlation::{CorrelationReport, CorrelationResult, compute_correlation};
//!   # use rust_lagcorr::series::TimePoint;
//!   # fn run(response: &[TimePoint], explanatory: &[TimePoint]) -> CorrelationResult<()> {
//!   let report: CorrelationReport = compute_correlation(response, explanatory, 28)?;
//!   println!("best lag {} (r² = {:.3})", report.best_lag(), report.r2_at_best_lag());
//!   # Ok(())
//!   # }
//!   ```
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests; `engine` covers the properties of
//!   a full run, and `tests/integration_lag_pipeline.rs` covers calendar
//!   date keys end to end.

pub mod engine;
pub mod errors;
#[cfg(feature = "obs_slog")]
pub(crate) mod observer;
pub mod options;
pub mod regression;
pub mod report;
pub mod significance;
pub mod window;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::engine::{
    LagCorrelationEngine, compute_correlation, compute_correlation_from_parts,
    compute_correlation_with_options,
};
pub use self::errors::{CorrelationError, CorrelationResult};
pub use self::options::{CorrelationOptions, DEFAULT_MAX_LAG, DegeneratePolicy};
pub use self::report::{CorrelationReport, LagResult};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_lagcorr::correlation::prelude::*;
//
// to import the main correlation surface in a single line.

pub mod prelude {
    pub use super::engine::{
        LagCorrelationEngine, compute_correlation, compute_correlation_from_parts,
        compute_correlation_with_options,
    };
    pub use super::errors::{CorrelationError, CorrelationResult};
    pub use super::options::{CorrelationOptions, DEFAULT_MAX_LAG, DegeneratePolicy};
    pub use super::report::{CorrelationReport, LagResult};
}
