//! Per-tick reports and cumulative metrics

use std::path::PathBuf;
use std::time::Duration;

/// Outcome of one removal pass.
///
/// Per-entity failures are data here, not errors: the sweep absorbs them
/// and callers assert on counts instead of catching anything.
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    /// Candidates evaluated against their retention
    pub evaluated: usize,

    /// Entries actually deleted
    pub removed: usize,

    /// Eligible entries that would have been deleted (dry-run only)
    pub would_remove: usize,

    /// Removals that failed (permission, lock, I/O)
    pub failed: usize,

    /// Watched paths skipped because they could not be read
    pub skipped_paths: usize,

    /// Failed removals, as (path, error) pairs for the log
    pub failures: Vec<(PathBuf, String)>,
}

impl SweepReport {
    /// Record a failed removal.
    pub fn record_failure(&mut self, path: PathBuf, error: String) {
        self.failed += 1;
        self.failures.push((path, error));
    }
}

/// Metrics accumulated across the supervisor's lifetime.
#[derive(Debug, Clone, Default)]
pub struct SweepMetrics {
    /// Removal passes completed
    pub sweep_count: usize,

    /// Configuration reloads applied
    pub reloads_applied: usize,

    /// Configuration reloads rejected by validation
    pub reloads_rejected: usize,

    /// Entries deleted in total
    pub total_removed: usize,

    /// Removal failures in total
    pub total_failed: usize,

    /// Watched-path skips in total
    pub total_skipped_paths: usize,

    /// Wall-clock time spent inside removal passes
    pub total_sweep_time: Duration,
}

impl SweepMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one sweep report into the running totals.
    pub fn record_sweep(&mut self, report: &SweepReport, elapsed: Duration) {
        self.sweep_count += 1;
        self.total_removed += report.removed;
        self.total_failed += report.failed;
        self.total_skipped_paths += report.skipped_paths;
        self.total_sweep_time += elapsed;
    }

    /// Record the outcome of a configuration reload.
    pub fn record_reload(&mut self, applied: bool) {
        if applied {
            self.reloads_applied += 1;
        } else {
            self.reloads_rejected += 1;
        }
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        format!(
            "sweeps: {} ({}ms in passes), removed: {}, failed: {}, \
             skipped paths: {}, reloads: {} applied / {} rejected",
            self.sweep_count,
            self.total_sweep_time.as_millis(),
            self.total_removed,
            self.total_failed,
            self.total_skipped_paths,
            self.reloads_applied,
            self.reloads_rejected,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_failure() {
        let mut report = SweepReport::default();
        report.record_failure(PathBuf::from("/data/a/busy.lock"), "locked".into());

        assert_eq!(report.failed, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].1, "locked");
    }

    #[test]
    fn test_metrics_accumulate_across_sweeps() {
        let mut metrics = SweepMetrics::new();

        let mut first = SweepReport::default();
        first.removed = 3;
        first.skipped_paths = 1;
        metrics.record_sweep(&first, Duration::from_millis(5));

        let mut second = SweepReport::default();
        second.removed = 2;
        second.record_failure(PathBuf::from("/x"), "denied".into());
        metrics.record_sweep(&second, Duration::from_millis(7));

        assert_eq!(metrics.sweep_count, 2);
        assert_eq!(metrics.total_removed, 5);
        assert_eq!(metrics.total_failed, 1);
        assert_eq!(metrics.total_skipped_paths, 1);
        assert_eq!(metrics.total_sweep_time, Duration::from_millis(12));
    }

    #[test]
    fn test_record_reload() {
        let mut metrics = SweepMetrics::new();
        metrics.record_reload(true);
        metrics.record_reload(false);
        metrics.record_reload(false);

        assert_eq!(metrics.reloads_applied, 1);
        assert_eq!(metrics.reloads_rejected, 2);
    }

    #[test]
    fn test_summary() {
        let mut metrics = SweepMetrics::new();
        let mut report = SweepReport::default();
        report.removed = 4;
        metrics.record_sweep(&report, Duration::from_millis(3));
        metrics.record_reload(true);

        let summary = metrics.summary();
        assert!(summary.contains("sweeps: 1"));
        assert!(summary.contains("removed: 4"));
        assert!(summary.contains("1 applied"));
    }
}
