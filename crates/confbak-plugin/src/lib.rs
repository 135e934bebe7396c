//! # confbak-plugin
//!
//! Plugin engine for Confbak. Provides:
//!
//! - The [`Extension`] trait: the four lifecycle hooks an extension may
//!   implement, plus its declared capability set
//! - A dynamic loader that scans the configured directory for extension
//!   units and isolates per-unit failures
//! - An ordered, immutable extension registry built once before dispatch
//! - A hook dispatcher that runs implementers in registration order and
//!   never lets an extension failure reach the host workflow

pub mod exports;
pub mod extension;
pub mod hooks;
pub mod loader;
pub mod macros;
pub mod prelude;
pub mod registry;

pub use extension::Extension;
pub use hooks::definitions::{Hook, HookSet};
pub use hooks::dispatcher::{DispatchSummary, HookDispatcher, HookFailure};
pub use loader::{LoadOutcome, ModuleRecord, ModuleStatus, load_extensions};
pub use registry::{ExtensionRegistry, ExtensionRegistryBuilder, RegistryEntry};
