//! The extension authoring contract.

use std::fmt;

use async_trait::async_trait;

use confbak_core::AppResult;
use confbak_core::types::{BackupFailure, BackupOutcome, DeviceRecord, RunReport};

use crate::hooks::definitions::HookSet;

/// Trait implemented by backup workflow extensions.
///
/// Each hook method has a no-op default; an extension overrides the ones it
/// cares about and declares exactly those in [`Extension::hooks`]. The
/// dispatcher filters on the declared set, so an undeclared override is
/// never called, and an empty set registers cleanly but has no effect.
///
/// Hooks are side-effect sinks. The dispatcher records a returned error
/// against the extension and moves on to the next one; a hook failure never
/// alters the outcome of the backup run itself. Argument bundles are
/// borrowed and shared across all implementers of one dispatch — extensions
/// must not rely on exclusive access.
///
/// Extensions holding mutable state shared across concurrent dispatches
/// (the host may back up devices in parallel) are responsible for their own
/// synchronization.
#[async_trait]
pub trait Extension: Send + Sync + fmt::Debug {
    /// Diagnostic name used in logs. Not required to be unique and never
    /// used for ordering.
    fn name(&self) -> &str;

    /// The hook points this extension implements.
    fn hooks(&self) -> HookSet;

    /// Called after a device configuration is successfully retrieved.
    async fn backup_success(
        &self,
        _record: &DeviceRecord,
        _outcome: &BackupOutcome,
    ) -> AppResult<()> {
        Ok(())
    }

    /// Called after a device retrieval attempt fails.
    async fn backup_failed(
        &self,
        _record: &DeviceRecord,
        _failure: &BackupFailure,
    ) -> AppResult<()> {
        Ok(())
    }

    /// Called exactly once per run with the aggregate results.
    async fn report(&self, _report: &RunReport) -> AppResult<()> {
        Ok(())
    }

    /// Called once per version-control save with the save outcome and the
    /// diff summary or error text.
    async fn git_report(&self, _success: bool, _message: &str) -> AppResult<()> {
        Ok(())
    }
}
