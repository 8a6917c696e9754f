//! correlation::observer — optional slog output for verbose runs.
//!
//! Compiled only with the `obs_slog` feature. When
//! `CorrelationOptions::verbose` is set, the engine builds a non-blocking
//! terminal logger and reports the alignment summary, each evaluated lag,
//! and the selected best lag as structured key/value records.
use slog::{Drain, Logger, debug, info, o};

use crate::correlation::{
    options::CorrelationOptions,
    report::{CorrelationReport, LagResult},
};

/// Terminal logger backed by an async drain; records are flushed when the
/// logger is dropped at the end of the run.
pub(crate) fn term_logger() -> Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    Logger::root(drain, o!("component" => "lag_correlation"))
}

pub(crate) fn log_alignment(
    logger: &Logger, response_len: usize, explanatory_len: usize, aligned_len: usize,
    opts: &CorrelationOptions,
) {
    info!(logger, "series aligned";
        "response_len" => response_len,
        "explanatory_len" => explanatory_len,
        "aligned_len" => aligned_len,
        "max_lag" => opts.max_lag,
        "window_len" => aligned_len - opts.max_lag
    );
}

pub(crate) fn log_lag(logger: &Logger, result: &LagResult) {
    debug!(logger, "lag evaluated";
        "lag" => result.lag,
        "r2" => result.r2,
        "slope" => result.slope,
        "intercept" => result.intercept,
        "samples" => result.sample_count
    );
}

pub(crate) fn log_best_lag(logger: &Logger, report: &CorrelationReport) {
    info!(logger, "best lag selected";
        "best_lag" => report.best_lag(),
        "r2_at_best_lag" => report.r2_at_best_lag(),
        "r2_at_lag_zero" => report.r2_at_lag_zero()
    );
}
