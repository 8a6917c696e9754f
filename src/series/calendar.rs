//! series::calendar — conversions between calendar dates and time keys.
//!
//! Purpose
//! -------
//! Time keys in this crate are plain integers in one of two encodings:
//! YYYYMMDD date keys (e.g. `20200229`) or epoch days (days since
//! 1970-01-01). This module converts between those encodings and
//! `chrono::NaiveDate`, and generates runs of consecutive daily keys.
//!
//! Invariants & assumptions
//! ------------------------
//! - Both encodings are strictly increasing in calendar order, so either can
//!   be fed to the aligner. Mixing encodings between two series yields no
//!   (or meaningless) overlap; callers pick one per analysis.
//! - YYYYMMDD keys are *not* contiguous integers (`20200131` is followed by
//!   `20200201`). Lags are counted in aligned samples, never by key
//!   arithmetic.
//!
//! Testing notes
//! -------------
//! - Unit tests cover month and leap-year boundaries, invalid keys, and the
//!   epoch-day round trip at the epoch itself.
use chrono::{Datelike, NaiveDate};

use crate::series::errors::{SeriesError, SeriesResult};

/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// Encode `date` as a YYYYMMDD key.
pub fn date_key(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 10_000 + i64::from(date.month()) * 100 + i64::from(date.day())
}

/// Decode a YYYYMMDD key.
///
/// Errors
/// ------
/// - `SeriesError::InvalidDateKey { key }` for negative keys or keys that do
///   not name a real date (e.g. `20200230`, `20211301`).
pub fn parse_date_key(key: i64) -> SeriesResult<NaiveDate> {
    let invalid = SeriesError::InvalidDateKey { key };
    if key < 0 {
        return Err(invalid);
    }
    let year = i32::try_from(key / 10_000).map_err(|_| invalid.clone())?;
    let month = ((key / 100) % 100) as u32;
    let day = (key % 100) as u32;
    NaiveDate::from_ymd_opt(year, month, day).ok_or(invalid)
}

/// Days elapsed since 1970-01-01 (negative before the epoch).
pub fn epoch_day(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE
}

/// Inverse of [`epoch_day`].
///
/// Errors
/// ------
/// - `SeriesError::EpochDayOutOfRange { day }` when the day lies outside
///   `chrono`'s supported date range.
pub fn from_epoch_day(day: i64) -> SeriesResult<NaiveDate> {
    let out_of_range = SeriesError::EpochDayOutOfRange { day };
    let days_from_ce = day
        .checked_add(UNIX_EPOCH_DAYS_FROM_CE)
        .and_then(|d| i32::try_from(d).ok())
        .ok_or_else(|| out_of_range.clone())?;
    NaiveDate::from_num_days_from_ce_opt(days_from_ce).ok_or(out_of_range)
}

/// YYYYMMDD keys for `count` consecutive days starting at `start`.
pub fn daily_date_keys(start: NaiveDate, count: usize) -> Vec<i64> {
    start.iter_days().take(count).map(date_key).collect()
}
