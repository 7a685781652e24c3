//! Enumeration types for the contest tracker.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a contest.
///
/// Statuses only move forward: `Upcoming -> Live -> Ended`. `Ended` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContestStatus {
    /// The contest has not started yet.
    Upcoming,
    /// The contest is running.
    Live,
    /// The contest is over.
    Ended,
}

impl ContestStatus {
    /// Position of this status in the lifecycle (0, 1, 2).
    pub const fn rank(self) -> u8 {
        match self {
            Self::Upcoming => 0,
            Self::Live => 1,
            Self::Ended => 2,
        }
    }

    /// The status that follows this one, or `None` for `Ended`.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Upcoming => Some(Self::Live),
            Self::Live => Some(Self::Ended),
            Self::Ended => None,
        }
    }

    /// Whether moving from `self` to `to` is a forward step.
    pub const fn precedes(self, to: Self) -> bool {
        self.rank() < to.rank()
    }

    /// Display label used by the rendering collaborator.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming",
            Self::Live => "Live",
            Self::Ended => "Ended",
        }
    }
}

impl core::fmt::Display for ContestStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// Informational update.
    Info,
    /// Something finished or succeeded.
    Success,
}

impl core::fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Info => f.write_str("info"),
            Self::Success => f.write_str("success"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_only_moves_forward() {
        assert!(ContestStatus::Upcoming.precedes(ContestStatus::Live));
        assert!(ContestStatus::Live.precedes(ContestStatus::Ended));
        assert!(!ContestStatus::Ended.precedes(ContestStatus::Live));
        assert!(!ContestStatus::Live.precedes(ContestStatus::Live));
        assert_eq!(ContestStatus::Ended.next(), None);
        assert_eq!(ContestStatus::Upcoming.next(), Some(ContestStatus::Live));
    }

    #[test]
    fn level_serializes_lowercase() {
        let json = serde_json::to_string(&NotificationLevel::Success).ok();
        assert_eq!(json.as_deref(), Some("\"success\""));
    }
}
