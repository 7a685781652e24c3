//! The contest store: sole owner of the contest collection.
//!
//! Every mutation funnels through [`ContestStore`], so the collection
//! invariants live in one place:
//!
//! - ids are unique for the whole lifetime of the store (entries are never
//!   removed, so the current collection is the full history),
//! - statuses only move forward,
//! - participant counts only grow, and only while a contest is `Upcoming`.
//!
//! Each applied mutation calls the caller-supplied [`RedrawHook`]. The store
//! itself never renders.

use std::collections::BTreeSet;

use codenotify_types::{Contest, ContestId, ContestStatus};
use tracing::{debug, warn};

/// Errors raised by the store's programmer-error guards.
///
/// Both are checked before anything is mutated, so a rejected call leaves
/// the collection untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A contest with this id is already in the collection.
    #[error("duplicate contest id: {id}")]
    DuplicateId {
        /// The colliding id.
        id: ContestId,
    },

    /// Participant growth must be strictly positive.
    #[error("participant delta must be positive, got {delta}")]
    InvalidDelta {
        /// The rejected delta.
        delta: i64,
    },
}

/// Callback invoked after every applied store mutation.
///
/// The rendering collaborator implements this to redraw the contest list
/// and calendar from the full current collection.
pub trait RedrawHook: Send {
    /// Called with the collection in display order after a mutation.
    fn redraw(&mut self, contests: &[Contest]);
}

/// A redraw hook that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpRedraw;

impl RedrawHook for NoOpRedraw {
    fn redraw(&mut self, _contests: &[Contest]) {}
}

/// Ordered collection of contests with an explicit mutation API.
pub struct ContestStore {
    /// Contests in display order, newest injected first.
    contests: Vec<Contest>,
    /// Every id ever inserted.
    ids: BTreeSet<ContestId>,
    /// Rendering collaborator.
    redraw: Box<dyn RedrawHook>,
}

impl core::fmt::Debug for ContestStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ContestStore")
            .field("contests", &self.contests.len())
            .finish_non_exhaustive()
    }
}

impl ContestStore {
    /// Create an empty store.
    pub fn new(redraw: Box<dyn RedrawHook>) -> Self {
        Self {
            contests: Vec::new(),
            ids: BTreeSet::new(),
            redraw,
        }
    }

    /// Create a store holding `seed` in the given order.
    ///
    /// The redraw hook is not called for the seed itself.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] if two seed contests share an id.
    pub fn with_contests(
        seed: Vec<Contest>,
        redraw: Box<dyn RedrawHook>,
    ) -> Result<Self, StoreError> {
        let mut ids = BTreeSet::new();
        for contest in &seed {
            if !ids.insert(contest.id.clone()) {
                return Err(StoreError::DuplicateId {
                    id: contest.id.clone(),
                });
            }
        }
        Ok(Self {
            contests: seed,
            ids,
            redraw,
        })
    }

    /// All contests in display order.
    pub fn contests(&self) -> &[Contest] {
        &self.contests
    }

    /// Number of contests.
    pub fn len(&self) -> usize {
        self.contests.len()
    }

    /// Whether the store holds no contests.
    pub fn is_empty(&self) -> bool {
        self.contests.is_empty()
    }

    /// Contest at a display position.
    pub fn get(&self, index: usize) -> Option<&Contest> {
        self.contests.get(index)
    }

    /// Look up a contest by id. Absence is not an error.
    pub fn find_by_id(&self, id: &ContestId) -> Option<&Contest> {
        self.contests.iter().find(|c| &c.id == id)
    }

    /// Contests whose name contains `query`, ignoring case, in display order.
    pub fn search(&self, query: &str) -> Vec<&Contest> {
        let needle = query.to_lowercase();
        self.contests
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Prepend a new contest.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] if the id is already present; the
    /// collection is left unchanged.
    pub fn insert_front(&mut self, contest: Contest) -> Result<(), StoreError> {
        if self.ids.contains(&contest.id) {
            warn!(contest_id = %contest.id, "rejected duplicate contest id");
            return Err(StoreError::DuplicateId { id: contest.id });
        }
        debug!(contest_id = %contest.id, name = %contest.name, "contest inserted");
        self.ids.insert(contest.id.clone());
        self.contests.insert(0, contest);
        self.notify_redraw();
        Ok(())
    }

    /// Move a contest to `new_status`.
    ///
    /// No-op if the id is absent, if the status is unchanged, or if the move
    /// would go backward. Returns whether the status changed.
    pub fn update_status(&mut self, id: &ContestId, new_status: ContestStatus) -> bool {
        let Some(contest) = self.contests.iter_mut().find(|c| &c.id == id) else {
            return false;
        };
        let old_status = contest.status;
        if !old_status.precedes(new_status) {
            if old_status != new_status {
                warn!(
                    contest_id = %id,
                    from = %old_status,
                    to = %new_status,
                    "ignored backward status change"
                );
            }
            return false;
        }
        contest.status = new_status;
        debug!(contest_id = %id, from = %old_status, to = %new_status, "status updated");
        self.notify_redraw();
        true
    }

    /// Grow a contest's participant count by `delta`.
    ///
    /// Returns the new count, or `None` if the contest is absent or not
    /// `Upcoming`. Counts saturate at `u64::MAX`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidDelta`] if `delta <= 0`; the collection
    /// is left unchanged.
    pub fn increment_participants(
        &mut self,
        id: &ContestId,
        delta: i64,
    ) -> Result<Option<u64>, StoreError> {
        let amount = u64::try_from(delta)
            .ok()
            .filter(|&d| d > 0)
            .ok_or(StoreError::InvalidDelta { delta })?;

        let Some(contest) = self.contests.iter_mut().find(|c| &c.id == id) else {
            return Ok(None);
        };
        if contest.status != ContestStatus::Upcoming {
            return Ok(None);
        }
        contest.participants = contest.participants.saturating_add(amount);
        let participants = contest.participants;
        debug!(contest_id = %id, delta = amount, participants, "participants grown");
        self.notify_redraw();
        Ok(Some(participants))
    }

    /// Ask the rendering collaborator to redraw without mutating anything.
    ///
    /// Used to keep time-relative labels such as countdowns current.
    pub fn refresh(&mut self) {
        self.notify_redraw();
    }

    fn notify_redraw(&mut self) {
        self.redraw.redraw(&self.contests);
    }
}
