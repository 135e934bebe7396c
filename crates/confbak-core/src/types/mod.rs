//! Domain types carried by extension hook invocations.

pub mod inventory;
pub mod outcome;
pub mod report;

pub use inventory::DeviceRecord;
pub use outcome::{BackupFailure, BackupOutcome, FailureKind};
pub use report::RunReport;
