//! Per-job outcomes and run totals.
//!
//! Every [`ImageJob`](crate::scan::ImageJob) yields exactly one [`JobResult`].
//! [`RunSummary::record`] folds results into totals as they arrive; failed
//! jobs count toward `failed` but contribute no bytes.
//!
//! Savings are never clamped: an output larger than its source reports a
//! negative percentage.

use crate::error::JobError;
use crate::scan::ImageJob;
use serde::Serialize;

/// Metrics for one successfully optimized file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobStats {
    pub original_size: u64,
    pub new_size: u64,
    /// `(original - new) / original * 100`, one decimal place.
    pub savings_percent: f64,
    pub resized: bool,
    pub original_dimensions: (u32, u32),
    pub output_dimensions: (u32, u32),
}

/// Outcome of one job.
#[derive(Debug)]
pub enum JobResult {
    Optimized(JobStats),
    Failed(JobError),
}

impl JobResult {
    /// Display-ready copy of the outcome, with the error rendered as text.
    pub fn to_outcome(&self) -> Result<JobStats, String> {
        match self {
            JobResult::Optimized(stats) => Ok(stats.clone()),
            JobResult::Failed(err) => Err(err.to_string()),
        }
    }
}

/// Percentage saved going from `original` to `new` bytes, rounded to one
/// decimal place. A zero-byte original reports 0.0.
pub fn savings_percent(original: u64, new: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    let saved = original as f64 - new as f64;
    // `+ 0.0` turns a rounded -0.0 into 0.0
    (saved / original as f64 * 1000.0).round() / 10.0 + 0.0
}

/// Totals accumulated across a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub total_original: u64,
    pub total_new: u64,
}

impl RunSummary {
    pub fn record(&mut self, result: &JobResult) {
        match result {
            JobResult::Optimized(stats) => {
                self.succeeded += 1;
                self.total_original += stats.original_size;
                self.total_new += stats.new_size;
            }
            JobResult::Failed(_) => self.failed += 1,
        }
    }

    pub fn total_jobs(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Bytes saved across all successful jobs; negative when outputs grew.
    pub fn bytes_saved(&self) -> i64 {
        self.total_original as i64 - self.total_new as i64
    }

    pub fn savings_percent(&self) -> f64 {
        savings_percent(self.total_original, self.total_new)
    }
}

/// A job paired with its result, in processing order.
#[derive(Debug)]
pub struct JobRecord {
    pub job: ImageJob,
    pub result: JobResult,
}

/// Everything a finished run produced.
#[derive(Debug, Default)]
pub struct RunReport {
    pub summary: RunSummary,
    pub records: Vec<JobRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::BackendError;
    use std::path::PathBuf;

    fn stats(original: u64, new: u64) -> JobStats {
        JobStats {
            original_size: original,
            new_size: new,
            savings_percent: savings_percent(original, new),
            resized: false,
            original_dimensions: (10, 10),
            output_dimensions: (10, 10),
        }
    }

    fn failure() -> JobResult {
        JobResult::Failed(JobError::Probe {
            path: PathBuf::from("broken.jpg"),
            source: BackendError::Decode("truncated".into()),
        })
    }

    // =========================================================================
    // savings_percent tests
    // =========================================================================

    #[test]
    fn savings_sixty_percent() {
        assert_eq!(savings_percent(1000, 400), 60.0);
    }

    #[test]
    fn savings_negative_when_output_grows() {
        assert_eq!(savings_percent(1000, 1200), -20.0);
    }

    #[test]
    fn savings_rounds_to_one_decimal() {
        // 1/3 saved
        assert_eq!(savings_percent(3, 2), 33.3);
        // 2/3 saved
        assert_eq!(savings_percent(3, 1), 66.7);
    }

    #[test]
    fn savings_tiny_growth_rounds_to_positive_zero() {
        let percent = savings_percent(10_000, 10_004);
        assert_eq!(percent, 0.0);
        assert!(percent.is_sign_positive());
    }

    #[test]
    fn savings_zero_original() {
        assert_eq!(savings_percent(0, 0), 0.0);
        assert_eq!(savings_percent(0, 10), 0.0);
    }

    // =========================================================================
    // RunSummary tests
    // =========================================================================

    #[test]
    fn record_success_adds_sizes() {
        let mut summary = RunSummary::default();
        summary.record(&JobResult::Optimized(stats(500_000, 120_000)));
        summary.record(&JobResult::Optimized(stats(200_000, 150_000)));

        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.total_original, 700_000);
        assert_eq!(summary.total_new, 270_000);
        assert_eq!(summary.bytes_saved(), 430_000);
        assert_eq!(summary.savings_percent(), 61.4);
    }

    #[test]
    fn record_failure_excludes_sizes() {
        let mut summary = RunSummary::default();
        summary.record(&JobResult::Optimized(stats(1000, 400)));
        summary.record(&failure());

        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total_jobs(), 2);
        assert_eq!(summary.total_original, 1000);
        assert_eq!(summary.total_new, 400);
    }

    #[test]
    fn empty_summary_is_all_zero() {
        let summary = RunSummary::default();
        assert_eq!(summary.total_jobs(), 0);
        assert_eq!(summary.bytes_saved(), 0);
        assert_eq!(summary.savings_percent(), 0.0);
    }

    #[test]
    fn bytes_saved_negative_when_outputs_grow() {
        let mut summary = RunSummary::default();
        summary.record(&JobResult::Optimized(stats(1000, 1200)));
        assert_eq!(summary.bytes_saved(), -200);
        assert_eq!(summary.savings_percent(), -20.0);
    }

    #[test]
    fn outcome_renders_error_text() {
        let outcome = failure().to_outcome();
        assert!(outcome.unwrap_err().contains("truncated"));
    }
}
