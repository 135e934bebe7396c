//! Per-run aggregate results handed to the `report` hook.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use super::inventory::DeviceRecord;
use super::outcome::{BackupFailure, BackupOutcome};

/// Aggregate results for one backup run.
///
/// Wall-clock timestamps are kept for display; the duration is measured on
/// the monotonic clock between `start_timing` and `stop_timing`.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    start_ts: Option<DateTime<Utc>>,
    stop_ts: Option<DateTime<Utc>>,
    started: Option<Instant>,
    elapsed: Option<Duration>,
    successes: Vec<(DeviceRecord, BackupOutcome)>,
    failures: Vec<(DeviceRecord, BackupFailure)>,
}

impl RunReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the start of the run.
    pub fn start_timing(&mut self) {
        self.start_ts = Some(Utc::now());
        self.started = Some(Instant::now());
    }

    /// Marks the end of the run and fixes the duration.
    pub fn stop_timing(&mut self) {
        self.stop_ts = Some(Utc::now());
        self.elapsed = self.started.map(|t| t.elapsed());
    }

    /// Records one successful device backup.
    pub fn record_success(&mut self, record: DeviceRecord, outcome: BackupOutcome) {
        self.successes.push((record, outcome));
    }

    /// Records one failed device backup.
    pub fn record_failure(&mut self, record: DeviceRecord, failure: BackupFailure) {
        self.failures.push((record, failure));
    }

    /// Number of devices processed.
    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// Number of successful backups.
    pub fn ok_count(&self) -> usize {
        self.successes.len()
    }

    /// Number of failed backups.
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// Wall-clock start timestamp, if timing was started.
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_ts
    }

    /// Wall-clock stop timestamp, if timing was stopped.
    pub fn stop_time(&self) -> Option<DateTime<Utc>> {
        self.stop_ts
    }

    /// Monotonic run duration; zero until timing has been stopped.
    pub fn duration(&self) -> Duration {
        self.elapsed.unwrap_or_default()
    }

    /// Successful backups in completion order.
    pub fn successes(&self) -> &[(DeviceRecord, BackupOutcome)] {
        &self.successes
    }

    /// Failed backups in completion order.
    pub fn failures(&self) -> &[(DeviceRecord, BackupFailure)] {
        &self.failures
    }

    /// One-line summary in the style of the run banner.
    pub fn summary(&self) -> String {
        format!(
            "TOTAL={}, OK={}, FAIL={}, DURATION={:.3}s",
            self.total(),
            self.ok_count(),
            self.failed_count(),
            self.duration().as_secs_f64()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_follow_recorded_results() {
        let mut report = RunReport::new();
        report.record_success(
            DeviceRecord::new("r1", "ios"),
            BackupOutcome::saved(Duration::from_millis(120)),
        );
        report.record_failure(
            DeviceRecord::new("r2", "ios"),
            BackupFailure::timeout("after 60s"),
        );

        assert_eq!(report.total(), 2);
        assert_eq!(report.ok_count(), 1);
        assert_eq!(report.failed_count(), 1);
    }

    #[test]
    fn summary_line_shape() {
        let report = RunReport::new();
        assert_eq!(report.summary(), "TOTAL=0, OK=0, FAIL=0, DURATION=0.000s");
    }

    #[test]
    fn duration_is_zero_until_stopped() {
        let mut report = RunReport::new();
        report.start_timing();
        assert_eq!(report.duration(), Duration::ZERO);
        report.stop_timing();
        assert!(report.stop_time().is_some());
    }
}
