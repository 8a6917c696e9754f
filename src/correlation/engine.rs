//! correlation::engine — lagged regression scan over two aligned series.
//!
//! Purpose
//! -------
//! Measure how well an explanatory series predicts a response series at
//! every integer lag in `[−L, L]` and report the lag where the linear fit is
//! strongest. This is the entry point used by the dashboard's lag chart and
//! "best lag" headline.
//!
//! Key behaviors
//! -------------
//! - Align the two inputs on shared time keys (see
//!   [`align`](crate::series::align::align)).
//! - Fail fast with `InsufficientData` when fewer than `2L` samples (at
//!   least one) survive alignment, before any regression.
//! - For each lag in generation order, slice the fixed base window and the
//!   shifted window (see [`window`](crate::correlation::window)), regress
//!   the fixed window on the shifted one, and record a [`LagResult`].
//! - Select the best lag as the first maximal r² in generation order.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every lag's regression uses exactly `n − L` samples, so r² values are
//!   comparable across lags.
//! - Inputs are ascending and unique by time; unsorted inputs give an
//!   unspecified report rather than a panic.
//! - Pure and deterministic: no I/O (apart from optional slog output), no
//!   shared state, identical inputs give equal reports.
//!
//! Conventions
//! -----------
//! - Positive lag k: explanatory at t − k is paired with response at t
//!   (explanatory leads). Negative lag −k: response at t − k is paired with
//!   explanatory at t (response leads).
//! - The regression's `x` is always the shifted window and `y` the fixed
//!   base window.
//!
//! Downstream usage
//! ----------------
//! - Most callers use [`compute_correlation`] with the default `L = 28`;
//!   callers needing a degenerate-window error or slog output pass a
//!   [`CorrelationOptions`] to [`compute_correlation_with_options`] or hold a
//!   [`LagCorrelationEngine`].
//! - Bindings that receive raw time/value columns call
//!   [`compute_correlation_from_parts`], which validates them as series.
//! - On `InsufficientData`, a caller can retry with a smaller `max_lag` or
//!   a wider date range; the error carries both counts.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the sample-count boundary, the equal-sample-count and
//!   report-size invariants, lead/lag direction on shifted signals,
//!   determinism, the degenerate policies, non-finite rejection, raw
//!   column validation, and (with `obs_slog`) verbose runs.
use ndarray::s;

#[cfg(feature = "obs_slog")]
use crate::correlation::observer;
use crate::{
    correlation::{
        errors::{CorrelationError, CorrelationResult},
        options::{CorrelationOptions, DegeneratePolicy},
        regression::fit_linear,
        report::{CorrelationReport, LagResult},
        significance::slope_p_value,
        window::{LagWindow, lag_windows},
    },
    series::{
        align::{AlignedSeries, SeriesRole},
        point::{TimePoint, TimeSeries},
    },
};

/// Run the lag correlation scan with maximum lag `max_lag` and default
/// options.
///
/// Parameters
/// ----------
/// - `response`: `&[TimePoint]`
///   Series to be explained, ascending and unique by time.
/// - `explanatory`: `&[TimePoint]`
///   Candidate predictor, ascending and unique by time.
/// - `max_lag`: `usize`
///   Largest absolute lag L (the dashboard uses
///   [`DEFAULT_MAX_LAG`](crate::correlation::options::DEFAULT_MAX_LAG)).
///
/// Returns
/// -------
/// `CorrelationResult<CorrelationReport>`
///   - `Ok(report)` with `2L + 1` lag results in generation order.
///   - `Err(CorrelationError)` on a failed precondition.
///
/// Errors
/// ------
/// - `CorrelationError::InsufficientData { actual, required }`
///   Fewer than `max(2L, 1)` aligned samples.
/// - `CorrelationError::NonFiniteValue { series, time, value }`
///   An aligned observation is NaN or ±∞.
///
/// Examples
/// --------
/// ```rust
/// # use rust_lagcorr::correlation::engine::compute_correlation;
/// # use rust_lagcorr::series::point::TimePoint;
/// let response: Vec<TimePoint> =
///     (0..20).map(|t| TimePoint::new(t, ((t * t) % 7) as f64)).collect();
/// let explanatory = response.clone();
///
/// let report = compute_correlation(&response, &explanatory, 5).unwrap();
/// assert_eq!(report.all_lags().len(), 11);
/// assert_eq!(report.best_lag(), 0);
/// assert_eq!(report.r2_at_lag_zero(), 1.0);
/// ```
pub fn compute_correlation(
    response: &[TimePoint], explanatory: &[TimePoint], max_lag: usize,
) -> CorrelationResult<CorrelationReport> {
    let opts = CorrelationOptions::default().with_max_lag(max_lag);
    compute_correlation_with_options(response, explanatory, &opts)
}

/// Run the lag correlation scan with explicit options.
///
/// Errors
/// ------
/// - Everything [`compute_correlation`] returns, plus
///   `CorrelationError::DegenerateRegression { lag }` for the first lag in
///   generation order whose fixed window is constant, when
///   `opts.degenerate == DegeneratePolicy::Error`.
pub fn compute_correlation_with_options(
    response: &[TimePoint], explanatory: &[TimePoint], opts: &CorrelationOptions,
) -> CorrelationResult<CorrelationReport> {
    let aligned = AlignedSeries::new(response, explanatory);
    validate_sample_count(aligned.len(), opts)?;
    validate_aligned_values(&aligned)?;

    #[cfg(feature = "obs_slog")]
    let logger = opts.verbose.then(observer::term_logger);
    #[cfg(feature = "obs_slog")]
    if let Some(logger) = &logger {
        observer::log_alignment(logger, response.len(), explanatory.len(), aligned.len(), opts);
    }

    let mut all_lags = Vec::with_capacity(opts.lag_count());
    for window in lag_windows(aligned.len(), opts.max_lag) {
        let result = evaluate_lag(&aligned, &window, opts.degenerate)?;
        #[cfg(feature = "obs_slog")]
        if let Some(logger) = &logger {
            observer::log_lag(logger, &result);
        }
        all_lags.push(result);
    }

    let report = CorrelationReport::from_lag_results(opts.max_lag, all_lags);
    #[cfg(feature = "obs_slog")]
    if let Some(logger) = &logger {
        observer::log_best_lag(logger, &report);
    }
    Ok(report)
}

/// Validate raw time/value columns as series, then run the scan.
///
/// Both sides go through [`TimeSeries::from_parts`], so unequal column
/// lengths, non-finite values and unsorted keys are rejected before
/// alignment.
///
/// Errors
/// ------
/// - `CorrelationError::Series(SeriesError)` for a column that fails series
///   validation, response side first.
/// - Everything [`compute_correlation_with_options`] returns.
pub fn compute_correlation_from_parts(
    response_times: &[i64], response_values: &[f64], explanatory_times: &[i64],
    explanatory_values: &[f64], opts: &CorrelationOptions,
) -> CorrelationResult<CorrelationReport> {
    let response = TimeSeries::from_parts(response_times, response_values)?;
    let explanatory = TimeSeries::from_parts(explanatory_times, explanatory_values)?;
    compute_correlation_with_options(&response, &explanatory, opts)
}

/// LagCorrelationEngine — reusable handle around a fixed configuration.
///
/// Notes
/// -----
/// - Holds only [`CorrelationOptions`]; it is `Copy`, `Send` and `Sync`
///   and may be shared freely across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LagCorrelationEngine {
    opts: CorrelationOptions,
}

impl LagCorrelationEngine {
    pub fn new(opts: CorrelationOptions) -> Self {
        LagCorrelationEngine { opts }
    }

    pub fn options(&self) -> &CorrelationOptions {
        &self.opts
    }

    /// See [`compute_correlation_with_options`].
    pub fn compute(
        &self, response: &[TimePoint], explanatory: &[TimePoint],
    ) -> CorrelationResult<CorrelationReport> {
        compute_correlation_with_options(response, explanatory, &self.opts)
    }
}

//
// ---------- Private helpers ----------
//

/// Reject runs whose aligned sample count cannot fill every window.
fn validate_sample_count(n: usize, opts: &CorrelationOptions) -> CorrelationResult<()> {
    let required = opts.required_samples();
    if n < required {
        return Err(CorrelationError::InsufficientData { actual: n, required });
    }
    Ok(())
}

/// Reject the first non-finite aligned value, response side first.
fn validate_aligned_values(aligned: &AlignedSeries) -> CorrelationResult<()> {
    for role in [SeriesRole::Response, SeriesRole::Explanatory] {
        if let Some(point) = aligned.points(role).iter().find(|p| !p.value.is_finite()) {
            return Err(CorrelationError::NonFiniteValue {
                series: role,
                time: point.time,
                value: point.value,
            });
        }
    }
    Ok(())
}

/// Regress one lag window and package the result.
fn evaluate_lag(
    aligned: &AlignedSeries, window: &LagWindow, policy: DegeneratePolicy,
) -> CorrelationResult<LagResult> {
    let response = aligned.values(SeriesRole::Response).slice(s![window.response.clone()]);
    let explanatory = aligned.values(SeriesRole::Explanatory).slice(s![window.explanatory.clone()]);

    let (variable, fixed) =
        if window.response_is_fixed() { (explanatory, response) } else { (response, explanatory) };
    let fit = fit_linear(variable, fixed);

    if fit.fixed_constant && policy == DegeneratePolicy::Error {
        return Err(CorrelationError::DegenerateRegression { lag: window.lag });
    }

    let sample_count = window.len();
    Ok(LagResult {
        lag: window.lag,
        r2: fit.r2,
        slope: fit.slope,
        intercept: fit.intercept,
        r: fit.r,
        p_value: slope_p_value(&fit, sample_count),
        sample_count,
        response_window: aligned.points(SeriesRole::Response)[window.response.clone()].to_vec(),
        explanatory_window: aligned.points(SeriesRole::Explanatory)[window.explanatory.clone()]
            .to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::series::errors::SeriesError;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The insufficient-data boundary (2L − 1 fails, 2L succeeds) and the
    //   disjoint-dates case.
    // - Report size, equal sample counts and generation order.
    // - Lead/lag direction on a signal shifted by a known number of steps.
    // - Best-lag consistency and determinism.
    // - Degenerate-window policies and non-finite rejection.
    //
    // They intentionally DO NOT cover:
    // - Calendar-key handling and end-to-end usage with real date keys;
    //   see `tests/integration_lag_pipeline.rs`.
    // -------------------------------------------------------------------------

    /// Deterministic, irregular signal so only the true shift fits exactly.
    fn signal(t: i64) -> f64 {
        let u = (t + 1_000) as f64;
        (0.37 * u).sin() * 10.0 + ((t * 7919).rem_euclid(31)) as f64
    }

    fn points(len: i64, f: impl Fn(i64) -> f64) -> Vec<TimePoint> {
        (0..len).map(|t| TimePoint::new(t, f(t))).collect()
    }

    #[test]
    // Purpose
    // -------
    // Verify the sample-count boundary.
    //
    // Given
    // -----
    // - L = 28; aligned lengths 55 (= 2L − 1) and 56 (= 2L).
    //
    // Expect
    // ------
    // - 55 → `InsufficientData { actual: 55, required: 56 }`.
    // - 56 → Ok, with 28 samples per lag.
    fn compute_correlation_insufficient_data_boundary() {
        // Arrange
        let short = points(55, signal);
        let exact = points(56, signal);

        // Act
        let fail = compute_correlation(&short, &short, 28);
        let ok = compute_correlation(&exact, &exact, 28);

        // Assert
        assert_eq!(fail, Err(CorrelationError::InsufficientData { actual: 55, required: 56 }));
        let report = ok.expect("2L samples must succeed");
        assert_eq!(report.sample_count(), 28);
    }

    #[test]
    // Purpose
    // -------
    // Series with no shared dates fail with a zero count.
    fn compute_correlation_disjoint_dates_fail_with_zero_count() {
        let response: Vec<TimePoint> = (0..60).map(|t| TimePoint::new(2 * t, signal(t))).collect();
        let explanatory: Vec<TimePoint> =
            (0..60).map(|t| TimePoint::new(2 * t + 1, signal(t))).collect();

        let result = compute_correlation(&response, &explanatory, 28);

        assert_eq!(result, Err(CorrelationError::InsufficientData { actual: 0, required: 56 }));
    }

    #[test]
    // Purpose
    // -------
    // Verify report size, generation order and the equal-sample-count
    // invariant, plus window contents at one positive and one negative lag.
    //
    // Given
    // -----
    // - 40 aligned samples, L = 6.
    //
    // Expect
    // ------
    // - 13 results ordered [0..=6, −1..=−6], each with 34 samples.
    // - Lag 2: response window starts at t = 6, explanatory at t = 4.
    // - Lag −2: response window starts at t = 4, explanatory at t = 6.
    fn compute_correlation_report_shape_and_windows() {
        // Arrange
        let response = points(40, signal);
        let explanatory = points(40, |t| signal(t + 3));

        // Act
        let report = compute_correlation(&response, &explanatory, 6).expect("enough data");

        // Assert
        let lags: Vec<i64> = report.all_lags().iter().map(|l| l.lag).collect();
        assert_eq!(lags, vec![0, 1, 2, 3, 4, 5, 6, -1, -2, -3, -4, -5, -6]);
        for l in report.all_lags() {
            assert_eq!(l.sample_count, 34);
            assert_eq!(l.response_window.len(), 34);
            assert_eq!(l.explanatory_window.len(), 34);
        }
        let plus_two = report.lag(2).expect("lag 2");
        assert_eq!(plus_two.response_window[0].time, 6);
        assert_eq!(plus_two.explanatory_window[0].time, 4);
        let minus_two = report.lag(-2).expect("lag -2");
        assert_eq!(minus_two.response_window[0].time, 4);
        assert_eq!(minus_two.explanatory_window[0].time, 6);
    }

    #[test]
    // Purpose
    // -------
    // An explanatory signal that leads the response by 5 steps is found at
    // lag +5 with an exact fit.
    //
    // Given
    // -----
    // - explanatory[t] = s(t), response[t] = s(t − 5), 60 samples, L = 28.
    //
    // Expect
    // ------
    // - best_lag = 5, r² = 1.0, slope = 1.0, intercept = 0.0 exactly.
    // - Every other lag has r² < 1.
    fn compute_correlation_finds_positive_lead() {
        // Arrange
        let explanatory = points(60, signal);
        let response = points(60, |t| signal(t - 5));

        // Act
        let report = compute_correlation(&response, &explanatory, 28).expect("enough data");

        // Assert
        assert_eq!(report.best_lag(), 5);
        assert_eq!(report.r2_at_best_lag(), 1.0);
        let best = report.best_lag_result();
        assert_eq!(best.slope, 1.0);
        assert_eq!(best.intercept, 0.0);
        assert_eq!(best.p_value, Some(0.0));
        assert!(report.all_lags().iter().filter(|l| l.lag != 5).all(|l| l.r2 < 1.0));
    }

    #[test]
    // Purpose
    // -------
    // The mirrored shift is reported as a negative lag.
    //
    // Given
    // -----
    // - response[t] = s(t), explanatory[t] = s(t − 5).
    //
    // Expect
    // ------
    // - best_lag = −5 with r² = 1.0.
    fn compute_correlation_finds_negative_lead() {
        let response = points(60, signal);
        let explanatory = points(60, |t| signal(t - 5));

        let report = compute_correlation(&response, &explanatory, 28).expect("enough data");

        assert_eq!(report.best_lag(), -5);
        assert_eq!(report.r2_at_best_lag(), 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Best-lag consistency and determinism on an imperfect relationship.
    //
    // Given
    // -----
    // - response = 2·s(t − 3) + noise-like term, explanatory = s(t).
    //
    // Expect
    // ------
    // - r2_at_best_lag equals the maximum r² and best_lag is the first lag
    //   attaining it.
    // - Two runs produce equal reports.
    fn compute_correlation_is_consistent_and_deterministic() {
        // Arrange
        let explanatory = points(80, signal);
        let response = points(80, |t| 2.0 * signal(t - 3) + ((t * 13) % 5) as f64 * 0.1);

        // Act
        let first = compute_correlation(&response, &explanatory, 10).expect("enough data");
        let second = compute_correlation(&response, &explanatory, 10).expect("enough data");

        // Assert
        let max_r2 = first.all_lags().iter().map(|l| l.r2).fold(f64::NEG_INFINITY, f64::max);
        let first_max =
            first.all_lags().iter().find(|l| l.r2 == max_r2).map(|l| l.lag).expect("non-empty");
        assert_eq!(first.r2_at_best_lag(), max_r2);
        assert_eq!(first.best_lag(), first_max);
        assert_eq!(first.best_lag(), 3);
        assert_relative_eq!(first.best_lag_result().slope, 2.0, epsilon = 0.05);
        assert_eq!(first, second);
    }

    #[test]
    // Purpose
    // -------
    // Constant fixed windows take the sentinel by default and fail under
    // the error policy, at the first lag in generation order.
    //
    // Given
    // -----
    // - response constant at 3.0, explanatory varying; 20 samples, L = 4.
    //
    // Expect
    // ------
    // - Sentinel: every non-negative lag has r² = 1.0 (flat fit); best lag 0.
    // - Error policy: `DegenerateRegression { lag: 0 }`.
    fn compute_correlation_degenerate_policies() {
        // Arrange
        let response = points(20, |_| 3.0);
        let explanatory = points(20, signal);
        let strict = CorrelationOptions::default()
            .with_max_lag(4)
            .with_degenerate(DegeneratePolicy::Error);

        // Act
        let sentinel = compute_correlation(&response, &explanatory, 4).expect("sentinel policy");
        let error = compute_correlation_with_options(&response, &explanatory, &strict);

        // Assert
        assert_eq!(sentinel.best_lag(), 0);
        for l in sentinel.all_lags().iter().filter(|l| l.lag >= 0) {
            assert_eq!(l.r2, 1.0);
            assert_eq!(l.slope, 0.0);
            assert_eq!(l.intercept, 3.0);
            assert_eq!(l.p_value, None);
        }
        for l in sentinel.all_lags().iter().filter(|l| l.lag < 0) {
            assert_eq!(l.r2, 0.0);
        }
        assert_eq!(error, Err(CorrelationError::DegenerateRegression { lag: 0 }));
    }

    #[test]
    // Purpose
    // -------
    // Non-finite aligned values are rejected; unaligned ones are ignored.
    //
    // Given
    // -----
    // - A NaN in the explanatory series at t = 7 (shared date).
    // - A NaN in the response series at a date the explanatory lacks.
    //
    // Expect
    // ------
    // - First case: `NonFiniteValue { series: Explanatory, time: 7, .. }`.
    // - Second case: success.
    fn compute_correlation_rejects_only_aligned_non_finite_values() {
        // Arrange
        let response = points(30, signal);
        let mut explanatory = points(30, signal);
        explanatory[7].value = f64::NAN;

        let mut response_with_gap = points(31, signal);
        response_with_gap[30].value = f64::NAN;
        let clean = points(30, signal);

        // Act
        let poisoned = compute_correlation(&response, &explanatory, 5);
        let ignored = compute_correlation(&response_with_gap, &clean, 5);

        // Assert
        match poisoned {
            Err(CorrelationError::NonFiniteValue { series, time, value }) => {
                assert_eq!(series, SeriesRole::Explanatory);
                assert_eq!(time, 7);
                assert!(value.is_nan());
            }
            other => panic!("expected NonFiniteValue, got {other:?}"),
        }
        assert!(ignored.is_ok());
    }

    #[test]
    // Purpose
    // -------
    // A zero maximum lag evaluates only lag 0 and needs one sample.
    fn compute_correlation_zero_max_lag() {
        let series = points(1, signal);

        let report = compute_correlation(&series, &series, 0).expect("one sample is enough");
        let empty = compute_correlation(&[], &[], 0);

        assert_eq!(report.all_lags().len(), 1);
        assert_eq!(report.best_lag(), 0);
        assert_eq!(empty, Err(CorrelationError::InsufficientData { actual: 0, required: 1 }));
    }

    #[test]
    // Purpose
    // -------
    // The engine handle gives the same report as the free function.
    fn lag_correlation_engine_matches_free_function() {
        let response = points(30, signal);
        let explanatory = points(30, |t| signal(t + 2));
        let engine = LagCorrelationEngine::new(CorrelationOptions::default().with_max_lag(5));

        let via_engine = engine.compute(&response, &explanatory).expect("enough data");
        let via_fn = compute_correlation(&response, &explanatory, 5).expect("enough data");

        assert_eq!(via_engine, via_fn);
        assert_eq!(engine.options().max_lag, 5);
    }

    #[test]
    // Purpose
    // -------
    // Raw columns are validated as series before the scan, and the errors
    // surface wrapped in `CorrelationError::Series`.
    //
    // Given
    // -----
    // - Valid columns of 20 points, then a response column with a repeated
    //   key, then an explanatory column with a missing value.
    //
    // Expect
    // ------
    // - Valid columns give the same report as `compute_correlation`.
    // - `Series(NotAscending { index: 2, .. })` and
    //   `Series(LengthMismatch { times: 20, values: 19 })`.
    fn compute_correlation_from_parts_wraps_series_errors() {
        // Arrange
        let times: Vec<i64> = (0..20).collect();
        let values: Vec<f64> = times.iter().map(|&t| signal(t)).collect();
        let mut repeated = times.clone();
        repeated[2] = 1;
        let opts = CorrelationOptions::default().with_max_lag(3);

        // Act
        let ok = compute_correlation_from_parts(&times, &values, &times, &values, &opts);
        let unsorted = compute_correlation_from_parts(&repeated, &values, &times, &values, &opts);
        let short = compute_correlation_from_parts(&times, &values, &times, &values[..19], &opts);

        // Assert
        let series = points(20, signal);
        assert_eq!(ok, compute_correlation(&series, &series, 3));
        assert!(matches!(
            unsorted,
            Err(CorrelationError::Series(SeriesError::NotAscending { index: 2, .. }))
        ));
        assert_eq!(
            short,
            Err(CorrelationError::Series(SeriesError::LengthMismatch { times: 20, values: 19 }))
        );
    }

    #[cfg(feature = "obs_slog")]
    #[test]
    // Purpose
    // -------
    // Verbose runs log through slog without changing the result.
    fn compute_correlation_verbose_matches_quiet_run() {
        // Arrange
        let response = points(40, signal);
        let explanatory = points(40, |t| signal(t - 3));
        let quiet = CorrelationOptions::default().with_max_lag(6);
        let verbose = quiet.with_verbose(true);

        // Act
        let expected = compute_correlation_with_options(&response, &explanatory, &quiet);
        let logged = compute_correlation_with_options(&response, &explanatory, &verbose);

        // Assert
        assert!(logged.is_ok());
        assert_eq!(logged, expected);
    }
}
