//! series::validation — shared guards for date-indexed inputs.
//!
//! Purpose
//! -------
//! Centralize the two checks every series consumer needs: finiteness of the
//! observed values and strict ascending order of the time keys. The series
//! container and the correlation engine both call into this module so the
//! error semantics stay identical.
//!
//! Invariants & assumptions
//! ------------------------
//! - "Ascending" means *strictly* ascending; equal neighbouring keys are
//!   duplicates and rejected.
//! - Helpers stop at the first violation and never panic.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the success path and each error branch.

use crate::series::{
    errors::{SeriesError, SeriesResult},
    point::TimePoint,
};

/// Reject the first non-finite value in `points`.
///
/// Errors
/// ------
/// - `SeriesError::NonFiniteValue { index, value }` pointing at the first
///   NaN or ±∞ observation.
pub fn validate_finite(points: &[TimePoint]) -> SeriesResult<()> {
    for (index, point) in points.iter().enumerate() {
        if !point.value.is_finite() {
            return Err(SeriesError::NonFiniteValue { index, value: point.value });
        }
    }
    Ok(())
}

/// Reject the first time key that does not strictly exceed its predecessor.
///
/// Errors
/// ------
/// - `SeriesError::NotAscending { index, previous, current }` where `index`
///   is the position of `current`.
pub fn validate_ascending(points: &[TimePoint]) -> SeriesResult<()> {
    for (offset, pair) in points.windows(2).enumerate() {
        let (previous, current) = (pair[0].time, pair[1].time);
        if current <= previous {
            return Err(SeriesError::NotAscending { index: offset + 1, previous, current });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `validate_finite` on clean input and on NaN / ±∞.
    // - `validate_ascending` on ascending input, duplicates, and inversions.
    // -------------------------------------------------------------------------

    fn points(times: &[i64], values: &[f64]) -> Vec<TimePoint> {
        times.iter().zip(values).map(|(&t, &v)| TimePoint::new(t, v)).collect()
    }

    #[test]
    // Purpose
    // -------
    // Both guards accept a clean, strictly ascending, finite series.
    fn validation_accepts_clean_series() {
        let series = points(&[1, 2, 5], &[0.5, -1.0, 3.0]);

        assert_eq!(validate_finite(&series), Ok(()));
        assert_eq!(validate_ascending(&series), Ok(()));
    }

    #[test]
    // Purpose
    // -------
    // Empty and single-point series are trivially valid.
    fn validation_accepts_empty_and_singleton() {
        let empty: Vec<TimePoint> = Vec::new();
        let single = points(&[20200101], &[1.0]);

        assert_eq!(validate_ascending(&empty), Ok(()));
        assert_eq!(validate_ascending(&single), Ok(()));
        assert_eq!(validate_finite(&empty), Ok(()));
    }

    #[test]
    // Purpose
    // -------
    // Ensure the first non-finite observation is reported with its index.
    //
    // Given
    // -----
    // - values = [1.0, +∞, NaN].
    //
    // Expect
    // ------
    // - `NonFiniteValue { index: 1, value: +∞ }`.
    fn validate_finite_reports_first_offender() {
        let series = points(&[1, 2, 3], &[1.0, f64::INFINITY, f64::NAN]);

        let result = validate_finite(&series);

        assert_eq!(result, Err(SeriesError::NonFiniteValue { index: 1, value: f64::INFINITY }));
    }

    #[test]
    // Purpose
    // -------
    // Duplicate keys violate strict ordering.
    //
    // Given
    // -----
    // - times = [10, 11, 11].
    //
    // Expect
    // ------
    // - `NotAscending { index: 2, previous: 11, current: 11 }`.
    fn validate_ascending_rejects_duplicates() {
        let series = points(&[10, 11, 11], &[0.0, 0.0, 0.0]);

        let result = validate_ascending(&series);

        assert_eq!(result, Err(SeriesError::NotAscending { index: 2, previous: 11, current: 11 }));
    }

    #[test]
    // Purpose
    // -------
    // An inversion is reported at the position of the smaller key.
    fn validate_ascending_rejects_inversion() {
        let series = points(&[20200103, 20200101], &[0.0, 0.0]);

        let result = validate_ascending(&series);

        assert_eq!(
            result,
            Err(SeriesError::NotAscending { index: 1, previous: 20200103, current: 20200101 })
        );
    }
}
