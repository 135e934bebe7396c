//! Lifecycle hook points and capability sets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Enumeration of the lifecycle hook points in the backup workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hook {
    /// Fired once per device whose configuration was retrieved.
    BackupSuccess,
    /// Fired once per device whose retrieval attempt failed.
    BackupFailed,
    /// Fired exactly once per run, after all devices are processed.
    Report,
    /// Fired once per version-control save.
    GitReport,
}

impl Hook {
    /// All hook points, in a fixed order.
    pub const ALL: [Hook; 4] = [
        Hook::BackupSuccess,
        Hook::BackupFailed,
        Hook::Report,
        Hook::GitReport,
    ];

    /// Returns the string name of this hook point.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BackupSuccess => "backup_success",
            Self::BackupFailed => "backup_failed",
            Self::Report => "report",
            Self::GitReport => "git_report",
        }
    }

    const fn bit(self) -> u8 {
        1u8 << (self as u8)
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The set of hook points an extension implements.
///
/// An empty set is valid: the extension registers cleanly but is never
/// dispatched.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct HookSet {
    bits: u8,
}

impl HookSet {
    /// The set containing no hooks.
    pub const EMPTY: HookSet = HookSet { bits: 0 };

    /// Creates an empty set.
    pub fn empty() -> Self {
        Self::EMPTY
    }

    /// Creates the set of all four hooks.
    pub fn all() -> Self {
        Hook::ALL.into_iter().collect()
    }

    /// Creates a set containing a single hook.
    pub fn of(hook: Hook) -> Self {
        Self { bits: hook.bit() }
    }

    /// Returns this set with `hook` added.
    #[must_use]
    pub fn with(self, hook: Hook) -> Self {
        Self {
            bits: self.bits | hook.bit(),
        }
    }

    /// Whether `hook` is in the set.
    pub fn contains(&self, hook: Hook) -> bool {
        self.bits & hook.bit() != 0
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Number of hooks in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Hooks in the set, in the fixed [`Hook::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = Hook> + '_ {
        Hook::ALL.into_iter().filter(|hook| self.contains(*hook))
    }
}

impl FromIterator<Hook> for HookSet {
    fn from_iter<I: IntoIterator<Item = Hook>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl fmt::Debug for HookSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|hook| hook.as_str())).finish()
    }
}
