//! Per-device backup attempt outcomes passed to success/failure hooks.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Success descriptor for one device backup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupOutcome {
    /// Whether a configuration file was saved. A retrieval that found no
    /// changes still succeeds without saving.
    pub saved: bool,
    /// Time spent retrieving the configuration.
    pub elapsed: Duration,
}

impl BackupOutcome {
    /// A retrieval that produced a saved configuration.
    pub fn saved(elapsed: Duration) -> Self {
        Self {
            saved: true,
            elapsed,
        }
    }

    /// A retrieval that completed without saving anything new.
    pub fn unchanged(elapsed: Duration) -> Self {
        Self {
            saved: false,
            elapsed,
        }
    }
}

/// Classification of a failed backup attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The device did not respond within the connection deadline.
    Timeout,
    /// The OS reported a socket or filesystem error.
    Io,
    /// Anything else, described by the message alone.
    Other,
}

/// Failure detail for one device backup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupFailure {
    /// Failure class.
    pub kind: FailureKind,
    /// Human-readable detail, e.g. the errno name or the exception text.
    pub message: String,
}

impl BackupFailure {
    /// A connection or command timeout.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Timeout,
            message: message.into(),
        }
    }

    /// An OS-level I/O failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Io,
            message: message.into(),
        }
    }

    /// Any other failure.
    pub fn other(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Other,
            message: message.into(),
        }
    }

    /// Short reason string used in failure reports.
    pub fn reason(&self) -> String {
        match self.kind {
            FailureKind::Timeout if self.message.is_empty() => "TIMEOUT".to_string(),
            FailureKind::Timeout => format!("TIMEOUT: {}", self.message),
            FailureKind::Io | FailureKind::Other => self.message.clone(),
        }
    }
}

impl fmt::Display for BackupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_reason_with_and_without_detail() {
        assert_eq!(BackupFailure::timeout("").reason(), "TIMEOUT");
        assert_eq!(
            BackupFailure::timeout("after 60s").reason(),
            "TIMEOUT: after 60s"
        );
    }

    #[test]
    fn io_reason_is_the_message() {
        assert_eq!(BackupFailure::io("ECONNREFUSED").reason(), "ECONNREFUSED");
    }
}
