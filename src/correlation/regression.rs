//! correlation::regression — ordinary least squares for one lag window.
//!
//! Purpose
//! -------
//! Fit the simple linear model `y = slope · x + intercept` to a pair of
//! equally long windows and report the coefficient of determination. The
//! engine calls this once per lag with `x` the shifted (variable) window and
//! `y` the fixed base window.
//!
//! Key behaviors
//! -------------
//! - [`fit_linear`] returns a [`LinearFit`] with slope, intercept, r², the
//!   signed Pearson correlation r, and the sums of squares behind them.
//! - Zero-variance windows never divide by zero; they take the documented
//!   fallbacks below and are flagged on the fit.
//!
//! Invariants & assumptions
//! ------------------------
//! - `x.len() == y.len() ≥ 1` and all values finite; the engine guarantees
//!   both before calling.
//! - `r2 = 1 − SS_res / SS_tot` with `SS_tot = Σ(y − ȳ)²`, clamped to
//!   `[0, 1]` to absorb rounding.
//! - Constant `y` (`SS_tot = 0`): the flat fit `slope = 0`,
//!   `intercept = y₀` reproduces `y` exactly, so `SS_res = 0` and
//!   `r2 = 1.0`; `fixed_constant` is set.
//! - Constant `x` with non-constant `y`: `slope = 0`, `intercept = ȳ`, so
//!   `SS_res = SS_tot` and `r2 = 0.0`; `variable_constant` is set.
//!
//! Conventions
//! -----------
//! - Sums are accumulated in index order in a single pass per quantity, so
//!   identical inputs give bit-identical fits.
//!
//! Testing notes
//! -------------
//! - Unit tests cover exact fits, a hand-computed noisy fit, both
//!   zero-variance fallbacks, and single-sample windows.
use ndarray::{ArrayView1, Zip};

/// LinearFit — OLS fit of `y` on `x` for one window.
///
/// Fields
/// ------
/// - `slope`, `intercept`: `f64`
///   Coefficients of `y = slope · x + intercept`.
/// - `r2`: `f64`
///   Coefficient of determination in `[0, 1]`.
/// - `r`: `f64`
///   Signed Pearson correlation in `[-1, 1]`; `0.0` when either window is
///   constant.
/// - `ss_res`, `ss_tot`: `f64`
///   Residual and total sums of squares of `y`.
/// - `fixed_constant`: `bool`
///   `y` has zero variance.
/// - `variable_constant`: `bool`
///   `x` has zero variance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r2: f64,
    pub r: f64,
    pub ss_res: f64,
    pub ss_tot: f64,
    pub fixed_constant: bool,
    pub variable_constant: bool,
}

impl LinearFit {
    /// Either window has zero variance.
    pub fn is_degenerate(&self) -> bool {
        self.fixed_constant || self.variable_constant
    }
}

/// Fit `y = slope · x + intercept` by ordinary least squares.
///
/// Parameters
/// ----------
/// - `x`: `ArrayView1<f64>`
///   Variable (lag-shifted) window.
/// - `y`: `ArrayView1<f64>`
///   Fixed base window; same length as `x`, at least one element.
///
/// Returns
/// -------
/// `LinearFit`
///   Coefficients, r², Pearson r and sums of squares.
///
/// Panics
/// ------
/// - Debug builds assert `x.len() == y.len()` and non-empty windows. The
///   engine never violates either.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_lagcorr::correlation::regression::fit_linear;
/// let x = array![1.0, 2.0, 3.0, 4.0];
/// let y = array![3.0, 5.0, 7.0, 9.0];
///
/// let fit = fit_linear(x.view(), y.view());
/// assert_eq!(fit.slope, 2.0);
/// assert_eq!(fit.intercept, 1.0);
/// assert_eq!(fit.r2, 1.0);
/// ```
pub fn fit_linear(x: ArrayView1<f64>, y: ArrayView1<f64>) -> LinearFit {
    debug_assert_eq!(x.len(), y.len(), "regression windows must have equal length");
    debug_assert!(!y.is_empty(), "regression windows must be non-empty");

    let first_y = y[0];
    if y.iter().all(|&v| v == first_y) {
        return LinearFit {
            slope: 0.0,
            intercept: first_y,
            r2: 1.0,
            r: 0.0,
            ss_res: 0.0,
            ss_tot: 0.0,
            fixed_constant: true,
            variable_constant: is_constant(x),
        };
    }

    let m = y.len() as f64;
    let x_mean = x.sum() / m;
    let y_mean = y.sum() / m;

    let (mut sxx, mut sxy, mut syy) = (0.0_f64, 0.0_f64, 0.0_f64);
    Zip::from(&x).and(&y).for_each(|&xi, &yi| {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    });

    let variable_constant = sxx == 0.0;
    let (slope, intercept) = if variable_constant {
        (0.0, y_mean)
    } else {
        let slope = sxy / sxx;
        (slope, y_mean - slope * x_mean)
    };

    let mut ss_res = 0.0_f64;
    Zip::from(&x).and(&y).for_each(|&xi, &yi| {
        let residual = yi - (slope * xi + intercept);
        ss_res += residual * residual;
    });

    let r2 = calc_r2(ss_res, syy);
    let r = if variable_constant || syy == 0.0 {
        0.0
    } else {
        (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
    };

    LinearFit {
        slope,
        intercept,
        r2,
        r,
        ss_res,
        ss_tot: syy,
        fixed_constant: false,
        variable_constant,
    }
}

/// r² from the sums of squares, with the zero-total fallback.
#[inline]
fn calc_r2(ss_res: f64, ss_tot: f64) -> f64 {
    if ss_tot == 0.0 {
        if ss_res == 0.0 { 1.0 } else { 0.0 }
    } else {
        (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
    }
}

#[inline]
fn is_constant(values: ArrayView1<f64>) -> bool {
    let mut iter = values.iter();
    match iter.next() {
        Some(&first) => iter.all(|&v| v == first),
        None => true,
    }
}
