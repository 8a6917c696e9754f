//! correlation::significance — t-test for the slope of a lag fit.
//!
//! Purpose
//! -------
//! Attach a two-sided p-value to each lag's regression so the presentation
//! layer can flag lags whose r² is indistinguishable from noise. Under the
//! usual OLS assumptions the statistic
//! t = r · √((m − 2) / (1 − r²)) follows Student-t with m − 2 degrees of
//! freedom under H₀: slope = 0.
//!
//! Invariants & assumptions
//! ------------------------
//! - m is the window length (identical for every lag of a run).
//! - Undefined cases return `None`: fewer than three samples, or a
//!   degenerate fit (either window constant).
//! - A perfect fit (SS_res = 0 or |r| = 1) returns `Some(0.0)` without
//!   evaluating the distribution.
//!
//! Notes
//! -----
//! - The p-value is descriptive. Best-lag selection uses r² only and scans
//!   many lags, so no multiple-comparison correction is applied here.
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::correlation::regression::LinearFit;

/// Two-sided p-value of H₀: slope = 0 for a fit over `sample_count` points.
///
/// Returns
/// -------
/// `Option<f64>`
///   - `Some(p)` with `p ∈ [0, 1]` when the test is defined.
///   - `None` when `sample_count < 3` or `fit.is_degenerate()`.
pub fn slope_p_value(fit: &LinearFit, sample_count: usize) -> Option<f64> {
    if sample_count < 3 || fit.is_degenerate() {
        return None;
    }
    let r = fit.r;
    if fit.ss_res == 0.0 || r.abs() >= 1.0 {
        return Some(0.0);
    }

    let dof = (sample_count - 2) as f64;
    let t_stat = r * (dof / (1.0 - r * r)).sqrt();
    let dist = StudentsT::new(0.0, 1.0, dof).ok()?;
    Some((2.0 * (1.0 - dist.cdf(t_stat.abs()))).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlation::regression::fit_linear;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Undefined cases (m < 3, degenerate fits).
    // - The perfect-fit shortcut.
    // - A known t-statistic against its Student-t tail probability.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Two samples leave no degrees of freedom.
    fn slope_p_value_requires_three_samples() {
        let fit = fit_linear(array![1.0, 2.0].view(), array![3.0, 1.0].view());

        assert_eq!(slope_p_value(&fit, 2), None);
    }

    #[test]
    // Purpose
    // -------
    // Degenerate fits have no meaningful slope test.
    fn slope_p_value_is_none_for_degenerate_fit() {
        let fit = fit_linear(array![1.0, 1.0, 1.0].view(), array![3.0, 1.0, 2.0].view());

        assert_eq!(slope_p_value(&fit, 3), None);
    }

    #[test]
    // Purpose
    // -------
    // A perfect linear fit is maximally significant.
    fn slope_p_value_perfect_fit_is_zero() {
        let fit = fit_linear(array![1.0, 2.0, 3.0, 4.0].view(), array![2.0, 4.0, 6.0, 8.0].view());

        assert_eq!(slope_p_value(&fit, 4), Some(0.0));
    }

    #[test]
    // Purpose
    // -------
    // Verify the p-value for the hand-computed noisy fit.
    //
    // Given
    // -----
    // - x = [1..5], y = [2, 4, 5, 4, 5], so r = 6/√60, m = 5, dof = 3.
    //   t = r·√(3 / (1 − r²)) = √(0.6·3/0.4) = √4.5 ≈ 2.1213.
    //
    // Expect
    // ------
    // - p = 2·(1 − F₃(2.1213)) ≈ 0.1240, within [0, 1].
    fn slope_p_value_matches_student_t_tail() {
        // Arrange
        let fit = fit_linear(
            array![1.0, 2.0, 3.0, 4.0, 5.0].view(),
            array![2.0, 4.0, 5.0, 4.0, 5.0].view(),
        );
        let dist = StudentsT::new(0.0, 1.0, 3.0).expect("valid dof");
        let expected = 2.0 * (1.0 - dist.cdf(4.5_f64.sqrt()));

        // Act
        let p = slope_p_value(&fit, 5).expect("defined for m = 5");

        // Assert
        assert_relative_eq!(p, expected, epsilon = 1e-9);
        assert!(p > 0.1 && p < 0.15, "p = {p}");
    }
}
