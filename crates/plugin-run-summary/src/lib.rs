//! Sample Confbak extensions: log failed devices as the run progresses,
//! then the aggregate run summary and the version-control save outcome.
//!
//! Built as a `cdylib`; dropping the library into the configured plugin
//! directory is all it takes to activate it.

use tracing::{info, warn};

use confbak_plugin::prelude::*;

/// Logs the run report and git save results at the end of a run.
#[derive(Debug, Default)]
pub struct RunSummaryExtension;

#[async_trait]
impl Extension for RunSummaryExtension {
    fn name(&self) -> &str {
        "run-summary"
    }

    fn hooks(&self) -> HookSet {
        HookSet::of(Hook::Report).with(Hook::GitReport)
    }

    async fn report(&self, report: &RunReport) -> AppResult<()> {
        info!(summary = %report.summary(), "backup run complete");
        for (record, failure) in report.failures() {
            warn!(host = %record.host, reason = %failure.reason(), "device backup failed");
        }
        Ok(())
    }

    async fn git_report(&self, success: bool, message: &str) -> AppResult<()> {
        if success {
            info!(%message, "configs saved to version control");
        } else {
            warn!(%message, "version control save failed");
        }
        Ok(())
    }
}

/// Logs each failed device as the run progresses.
#[derive(Debug, Default)]
pub struct FailureLogExtension;

#[async_trait]
impl Extension for FailureLogExtension {
    fn name(&self) -> &str {
        "failure-log"
    }

    fn hooks(&self) -> HookSet {
        HookSet::of(Hook::BackupFailed)
    }

    async fn backup_failed(
        &self,
        record: &DeviceRecord,
        failure: &BackupFailure,
    ) -> AppResult<()> {
        warn!(
            host = %record.host,
            os_name = %record.os_name,
            reason = %failure.reason(),
            "device backup failed"
        );
        Ok(())
    }
}

confbak_plugin::export_extensions![RunSummaryExtension, FailureLogExtension];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_the_two_reporting_hooks() {
        let ext = RunSummaryExtension;
        assert!(ext.hooks().contains(Hook::Report));
        assert!(ext.hooks().contains(Hook::GitReport));
        assert!(!ext.hooks().contains(Hook::BackupSuccess));
    }

    #[test]
    fn failure_log_only_sees_failed_backups() {
        let ext = FailureLogExtension;
        assert!(ext.hooks().contains(Hook::BackupFailed));
        assert!(!ext.hooks().contains(Hook::BackupSuccess));
        assert!(!ext.hooks().contains(Hook::Report));
    }

    #[tokio::test]
    async fn report_hook_accepts_an_empty_run() {
        let ext = RunSummaryExtension;
        let report = RunReport::new();
        assert!(ext.report(&report).await.is_ok());
    }
}
