//! Per-status contest actions offered on each contest card.
//!
//! Live contests can be joined, upcoming ones get a reminder, and ended
//! ones point at results. None of these mutate the store.

use codenotify_types::{ContestId, ContestStatus, Notification};

use crate::store::ContestStore;

/// The primary action for a contest in a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContestAction {
    /// Open the registration page of a running contest.
    JoinContest,
    /// Remind the user before an upcoming contest.
    SetReminder,
    /// Show results of a finished contest.
    ViewResults,
}

impl ContestAction {
    /// The action offered for `status`.
    pub const fn for_status(status: ContestStatus) -> Self {
        match status {
            ContestStatus::Live => Self::JoinContest,
            ContestStatus::Upcoming => Self::SetReminder,
            ContestStatus::Ended => Self::ViewResults,
        }
    }

    /// Button label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::JoinContest => "Join Contest",
            Self::SetReminder => "Set Reminder",
            Self::ViewResults => "View Results",
        }
    }
}

/// What performing an action asks the UI to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Open this URL.
    OpenUrl(String),
    /// Show this notification.
    Notify(Notification),
}

/// Perform the current primary action of contest `id`.
///
/// Returns `None` if the contest is not in the store.
pub fn perform(store: &ContestStore, id: &ContestId) -> Option<ActionOutcome> {
    let contest = store.find_by_id(id)?;
    let outcome = match ContestAction::for_status(contest.status) {
        ContestAction::JoinContest => ActionOutcome::OpenUrl(contest.registration_url.clone()),
        ContestAction::SetReminder => {
            ActionOutcome::Notify(Notification::info(format!("⏰ Reminder set for {}", contest.name)))
        }
        ContestAction::ViewResults => ActionOutcome::Notify(Notification::success(format!(
            "🏆 Results for {} are now available!",
            contest.name
        ))),
    };
    Some(outcome)
}
