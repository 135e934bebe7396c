//! Hook dispatcher — fires one hook across every implementing extension.
//!
//! Extensions run strictly in registration order, sequentially, on the
//! calling task. A failing extension is recorded and logged; the remaining
//! extensions still run, and the host workflow never sees the failure as an
//! error of its own. Dispatching a hook with zero implementers is a no-op.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use confbak_core::AppResult;
use confbak_core::error::AppError;
use confbak_core::types::{BackupFailure, BackupOutcome, DeviceRecord, RunReport};

use crate::hooks::definitions::Hook;
use crate::registry::{ExtensionRegistry, RegistryEntry};

/// Failure of a single extension during one hook invocation.
#[derive(Debug)]
pub struct HookFailure {
    /// Diagnostic name of the failing extension.
    pub extension: String,
    /// The hook that was being dispatched.
    pub hook: Hook,
    /// The error the extension returned, or the elapsed timeout.
    pub error: AppError,
}

/// Ephemeral record of one dispatch call.
#[derive(Debug)]
pub struct DispatchSummary {
    /// The hook that was dispatched.
    pub hook: Hook,
    /// Number of extensions invoked.
    pub invoked: usize,
    /// Per-extension failures, in invocation order.
    pub failures: Vec<HookFailure>,
}

impl DispatchSummary {
    fn new(hook: Hook) -> Self {
        Self {
            hook,
            invoked: 0,
            failures: Vec::new(),
        }
    }

    /// True when every invoked extension completed without error.
    pub fn ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Dispatches lifecycle hooks to the registered extensions.
///
/// Holds no state between calls. Concurrent dispatches over the shared
/// registry are safe because the registry is immutable once built; ordering
/// across different invocation points is entirely the host workflow's
/// concern.
#[derive(Debug, Clone)]
pub struct HookDispatcher {
    registry: Arc<ExtensionRegistry>,
    hook_timeout: Option<Duration>,
}

impl HookDispatcher {
    /// Creates a dispatcher over a built registry.
    pub fn new(registry: Arc<ExtensionRegistry>) -> Self {
        Self {
            registry,
            hook_timeout: None,
        }
    }

    /// Applies an explicit per-invocation timeout, recorded as that
    /// extension's failure when it elapses. Without it a hanging extension
    /// blocks the workflow step that fired the hook.
    #[must_use]
    pub fn with_hook_timeout(mut self, timeout: Duration) -> Self {
        self.hook_timeout = Some(timeout);
        self
    }

    /// The registry this dispatcher reads from.
    pub fn registry(&self) -> &Arc<ExtensionRegistry> {
        &self.registry
    }

    /// Fires `backup_success` for one retrieved device.
    pub async fn backup_success(
        &self,
        record: &DeviceRecord,
        outcome: &BackupOutcome,
    ) -> DispatchSummary {
        let hook = Hook::BackupSuccess;
        let mut summary = DispatchSummary::new(hook);
        for entry in self.registry.implementers(hook) {
            let call = entry.extension().backup_success(record, outcome);
            self.invoke(hook, entry, call, &mut summary).await;
        }
        Self::log_summary(&summary);
        summary
    }

    /// Fires `backup_failed` for one failed device.
    pub async fn backup_failed(
        &self,
        record: &DeviceRecord,
        failure: &BackupFailure,
    ) -> DispatchSummary {
        let hook = Hook::BackupFailed;
        let mut summary = DispatchSummary::new(hook);
        for entry in self.registry.implementers(hook) {
            let call = entry.extension().backup_failed(record, failure);
            self.invoke(hook, entry, call, &mut summary).await;
        }
        Self::log_summary(&summary);
        summary
    }

    /// Fires `report` with the aggregate run results. The host calls this
    /// exactly once per run, after all devices are processed.
    pub async fn report(&self, report: &RunReport) -> DispatchSummary {
        let hook = Hook::Report;
        let mut summary = DispatchSummary::new(hook);
        for entry in self.registry.implementers(hook) {
            let call = entry.extension().report(report);
            self.invoke(hook, entry, call, &mut summary).await;
        }
        Self::log_summary(&summary);
        summary
    }

    /// Fires `git_report` with the version-control save outcome.
    pub async fn git_report(&self, success: bool, message: &str) -> DispatchSummary {
        let hook = Hook::GitReport;
        let mut summary = DispatchSummary::new(hook);
        for entry in self.registry.implementers(hook) {
            let call = entry.extension().git_report(success, message);
            self.invoke(hook, entry, call, &mut summary).await;
        }
        Self::log_summary(&summary);
        summary
    }

    /// Runs one extension's hook, isolating its failure from the rest.
    async fn invoke(
        &self,
        hook: Hook,
        entry: &RegistryEntry,
        call: impl Future<Output = AppResult<()>>,
        summary: &mut DispatchSummary,
    ) {
        summary.invoked += 1;

        let result = match self.hook_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => Err(AppError::plugin(format!(
                    "hook timed out after {limit:?}"
                ))),
            },
            None => call.await,
        };

        if let Err(error) = result {
            warn!(
                extension = %entry.name(),
                hook = %hook,
                error = %error,
                "Extension hook failed"
            );
            summary.failures.push(HookFailure {
                extension: entry.name().to_string(),
                hook,
                error,
            });
        }
    }

    fn log_summary(summary: &DispatchSummary) {
        if summary.invoked > 0 {
            debug!(
                hook = %summary.hook,
                invoked = summary.invoked,
                failures = summary.failures.len(),
                "Hook dispatch complete"
            );
        }
    }
}
