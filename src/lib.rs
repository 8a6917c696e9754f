//! rust_lagcorr — lagged cross-correlation of date-indexed series with Python
//! bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the lag correlation engine to Python via the `_rust_lagcorr` extension
//! module. When the `python-bindings` feature is enabled, this module defines
//! the Python-facing class and submodule used by the `rust_lagcorr` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`series` and `correlation`) as the
//!   public crate surface.
//! - Define the `LagCorrelation` `#[pyclass]` wrapper and the `#[pymodule]`
//!   initializer for the `_rust_lagcorr` Python extension.
//! - Create and register the `correlation` submodule under `rust_lagcorr` so
//!   that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in [`correlation`]; this file performs only FFI
//!   glue, input validation, and error mapping.
//! - Inputs crossing the Python boundary are validated as
//!   [`series::TimeSeries`] (finite values, strictly ascending keys) before
//!   the engine runs.
//!
//! Conventions
//! -----------
//! - Time keys are `i64` values with a meaningful order, typically `YYYYMMDD`
//!   calendar keys (see [`series::calendar`]).
//! - Per-lag arrays exposed to Python keep the engine's generation order
//!   `0, 1, …, L, −1, …, −L`.
//! - Errors from core Rust code are propagated as rich error types internally
//!   and converted to `PyErr` values at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on [`correlation`] and
//!   [`series`] and can ignore the items guarded by `python-bindings`.
//! - The Python packaging layer imports `_rust_lagcorr` and wraps
//!   `LagCorrelation` in user-facing helpers.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_lag_pipeline.rs`.

pub mod correlation;
pub mod series;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

#[cfg(feature = "python-bindings")]
use crate::{
    correlation::{
        engine::compute_correlation_from_parts,
        options::{CorrelationOptions, DEFAULT_MAX_LAG},
        report::CorrelationReport,
    },
    utils::{contiguous, extract_f64_array, extract_i64_array},
};

/// LagCorrelation — Python-facing wrapper for a lag correlation run.
///
/// Purpose
/// -------
/// Run [`compute_correlation_from_parts`] on two Python-supplied series and
/// expose the headline figures and per-lag arrays as read-only properties.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `LagCorrelation(response_times, response_values, explanatory_times,
/// explanatory_values, max_lag=28)`:
/// - `response_times`, `explanatory_times`: array-like of `int64`
///   Strictly ascending time keys.
/// - `response_values`, `explanatory_values`: array-like of `float64`
///   Finite observations, one per time key.
/// - `max_lag`: `usize`
///   Largest absolute lag evaluated.
///
/// Fields
/// ------
/// - `inner`: [`CorrelationReport`]
///   Full report backing every accessor.
///
/// Notes
/// -----
/// - Rust callers should use [`correlation::compute_correlation`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_lagcorr.correlation", frozen)]
pub struct LagCorrelation {
    inner: CorrelationReport,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl LagCorrelation {
    #[new]
    #[pyo3(
        text_signature = "(response_times, response_values, explanatory_times, explanatory_values, /, max_lag=28)",
        signature = (response_times, response_values, explanatory_times, explanatory_values, max_lag = DEFAULT_MAX_LAG)
    )]
    pub fn new<'py>(
        py: Python<'py>, response_times: &Bound<'py, PyAny>, response_values: &Bound<'py, PyAny>,
        explanatory_times: &Bound<'py, PyAny>, explanatory_values: &Bound<'py, PyAny>,
        max_lag: usize,
    ) -> PyResult<Self> {
        let response_times = extract_i64_array(py, response_times)?;
        let response_values = extract_f64_array(py, response_values)?;
        let explanatory_times = extract_i64_array(py, explanatory_times)?;
        let explanatory_values = extract_f64_array(py, explanatory_values)?;

        let opts = CorrelationOptions::default().with_max_lag(max_lag);
        let inner = compute_correlation_from_parts(
            contiguous(&response_times, "response_times")?,
            contiguous(&response_values, "response_values")?,
            contiguous(&explanatory_times, "explanatory_times")?,
            contiguous(&explanatory_values, "explanatory_values")?,
            &opts,
        )?;
        Ok(LagCorrelation { inner })
    }

    #[getter]
    pub fn max_lag(&self) -> usize {
        self.inner.max_lag()
    }

    /// Lag with the highest r² (first in generation order on ties).
    #[getter]
    pub fn best_lag(&self) -> i64 {
        self.inner.best_lag()
    }

    #[getter]
    pub fn r2_at_best_lag(&self) -> f64 {
        self.inner.r2_at_best_lag()
    }

    #[getter]
    pub fn r2_at_lag_zero(&self) -> f64 {
        self.inner.r2_at_lag_zero()
    }

    /// Samples entering every regression.
    #[getter]
    pub fn sample_count(&self) -> usize {
        self.inner.sample_count()
    }

    #[getter]
    pub fn lags(&self) -> Vec<i64> {
        self.inner.all_lags().iter().map(|l| l.lag).collect()
    }

    #[getter]
    pub fn r2(&self) -> Vec<f64> {
        self.inner.all_lags().iter().map(|l| l.r2).collect()
    }

    #[getter]
    pub fn slopes(&self) -> Vec<f64> {
        self.inner.all_lags().iter().map(|l| l.slope).collect()
    }

    #[getter]
    pub fn intercepts(&self) -> Vec<f64> {
        self.inner.all_lags().iter().map(|l| l.intercept).collect()
    }

    /// Two-sided slope p-values; `None` where undefined.
    #[getter]
    pub fn p_values(&self) -> Vec<Option<f64>> {
        self.inner.all_lags().iter().map(|l| l.p_value).collect()
    }

    /// `(lag, r2)` pairs sorted by ascending lag.
    pub fn r2_curve(&self) -> Vec<(i64, f64)> {
        self.inner.r2_curve()
    }
}

/// _rust_lagcorr — PyO3 module initializer for the Python extension.
///
/// Creates the `correlation` submodule, attaches it to the parent module, and
/// registers it in `sys.modules` so `rust_lagcorr.correlation` is importable.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_lagcorr<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let correlation_mod = PyModule::new(_py, "correlation")?;
    correlation(_py, m, &correlation_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_lagcorr.correlation", correlation_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn correlation<'py>(
    _py: Python, rust_lagcorr: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<LagCorrelation>()?;
    rust_lagcorr.add_submodule(m)?;
    Ok(())
}
