//! Contest feed seam.
//!
//! The runner fires three kinds of scheduled action at a [`ContestFeed`].
//! [`UpdateSimulator`] answers them by mutating the store with simulated
//! data; a client for a real upstream feed would implement the same trait
//! and keep the [`ContestStore`] contract unchanged.
//!
//! [`UpdateSimulator`]: crate::simulator::UpdateSimulator

use chrono::{DateTime, Utc};
use codenotify_types::{ContestId, Notification};

use crate::store::{ContestStore, StoreError};

/// Errors a feed can report while applying an action.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// A store guard rejected a mutation.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: StoreError,
    },
}

/// A scheduled action fired by the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedAction {
    /// Reconcile stored statuses with wall-clock time.
    StatusSweep,
    /// Grow the participant count of one contest.
    ParticipantGrowth,
    /// Possibly add a new contest.
    ContestInjection,
}

/// An observable change, each delivered as exactly one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// The feed is connected.
    Connected,
    /// A contest moved to `Live`.
    ContestStarted {
        /// Contest id.
        id: ContestId,
        /// Contest name.
        name: String,
    },
    /// A contest moved to `Ended`.
    ContestEnded {
        /// Contest id.
        id: ContestId,
        /// Contest name.
        name: String,
    },
    /// A contest's participant count grew.
    ParticipantUpdate {
        /// Contest id.
        id: ContestId,
        /// Contest name.
        name: String,
        /// New participant count.
        participants: u64,
    },
    /// A new contest was added to the front of the collection.
    NewContest {
        /// Contest id.
        id: ContestId,
        /// Contest name.
        name: String,
    },
}

impl FeedEvent {
    /// Short machine-readable kind, used as a log field.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::ContestStarted { .. } => "contest_started",
            Self::ContestEnded { .. } => "contest_ended",
            Self::ParticipantUpdate { .. } => "participant_update",
            Self::NewContest { .. } => "new_contest",
        }
    }

    /// The user-facing notification for this event.
    pub fn notification(&self) -> Notification {
        match self {
            Self::Connected => Notification::success("🟢 Connected to contest feed"),
            Self::ContestStarted { name, .. } => Notification::info(format!("🚀 {name} has started!")),
            Self::ContestEnded { name, .. } => Notification::success(format!("🏁 {name} has ended!")),
            Self::ParticipantUpdate {
                name, participants, ..
            } => Notification::info(format!("📊 {name} now has {participants} participants")),
            Self::NewContest { name, .. } => Notification::info(format!("🆕 New contest: {name}")),
        }
    }
}

/// A source of contest updates driven by scheduled actions.
pub trait ContestFeed: Send {
    /// Apply `action` to `store` as of `now` and report what changed.
    ///
    /// Actions that find nothing to do return an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] if a store guard rejects a mutation. The store
    /// is unchanged by the rejected call.
    fn poll(
        &mut self,
        action: FeedAction,
        store: &mut ContestStore,
        now: DateTime<Utc>,
    ) -> Result<Vec<FeedEvent>, FeedError>;
}
