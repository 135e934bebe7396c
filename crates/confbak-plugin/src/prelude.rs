//! Prelude for extension authors.

pub use async_trait::async_trait;

pub use confbak_core::types::{BackupFailure, BackupOutcome, DeviceRecord, FailureKind, RunReport};
pub use confbak_core::{AppError, AppResult};

pub use crate::exports::{ExtensionBundle, ExtensionDescriptor};
pub use crate::extension::Extension;
pub use crate::hooks::definitions::{Hook, HookSet};

pub use crate::export_extensions;
