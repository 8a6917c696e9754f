//! series — date-indexed observations, validation and alignment.
//!
//! Purpose
//! -------
//! Hold everything that happens *before* a regression: the [`TimePoint`]
//! value type, validated [`TimeSeries`] containers, calendar key helpers,
//! and the merge-intersection that pairs a response series with an
//! explanatory series on their shared dates.
//!
//! Key behaviors
//! -------------
//! - [`align`] intersects two ascending series in a single pass.
//! - [`AlignedSeries`] splits the aligned pairs into parallel arrays for the
//!   lag engine in [`crate::correlation`].
//! - [`TimeSeries::new`] and [`validation`] enforce finite, strictly
//!   ascending input when callers want the aligner's precondition checked.
//! - [`calendar`] converts between `chrono::NaiveDate`, YYYYMMDD keys and
//!   epoch days.
//!
//! Invariants & assumptions
//! ------------------------
//! - Series are ascending and unique by `time`. The aligner assumes this
//!   without checking; `TimeSeries` checks it.
//! - Nothing in this subtree interpolates, resamples or fills missing
//!   dates; that policy belongs to the data source.
//!
//! Testing notes
//! -------------
//! - Each submodule carries its own unit tests; the end-to-end pipeline is
//!   covered in `tests/integration_lag_pipeline.rs`.

pub mod align;
pub mod calendar;
pub mod errors;
pub mod point;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::align::{AlignedPair, AlignedSeries, SeriesRole, align};
pub use self::calendar::{daily_date_keys, date_key, epoch_day, from_epoch_day, parse_date_key};
pub use self::errors::{SeriesError, SeriesResult};
pub use self::point::{TimePoint, TimeSeries};
pub use self::validation::{validate_ascending, validate_finite};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_lagcorr::series::prelude::*;
//
// to import the main series surface in a single line.

pub mod prelude {
    pub use super::align::{AlignedPair, AlignedSeries, SeriesRole, align};
    pub use super::errors::{SeriesError, SeriesResult};
    pub use super::point::{TimePoint, TimeSeries};
}
