//! Wall-clock status policy.
//!
//! A contest's true status is a function of the current instant:
//! `Upcoming` before `start_time`, `Live` in `[start_time, end_time)`, and
//! `Ended` from `end_time` on. The stored status is reconciled with that
//! function by periodic sweeps, one forward step per contest per sweep.

use chrono::{DateTime, Utc};
use codenotify_types::{Contest, ContestStatus};

/// The status a contest with the given window has at `now`.
pub fn status_at(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> ContestStatus {
    if now >= end {
        ContestStatus::Ended
    } else if now >= start {
        ContestStatus::Live
    } else {
        ContestStatus::Upcoming
    }
}

/// The single forward step due for `contest` at `now`, if any.
///
/// `Upcoming -> Live` once `now >= start_time`; `Live -> Ended` once
/// `now >= end_time`. An `Upcoming` contest whose end has also passed only
/// moves to `Live` here and reaches `Ended` on the next evaluation.
/// `Ended` never has a due transition.
pub fn due_transition(contest: &Contest, now: DateTime<Utc>) -> Option<ContestStatus> {
    let due = match contest.status {
        ContestStatus::Upcoming => now >= contest.start_time,
        ContestStatus::Live => now >= contest.end_time,
        ContestStatus::Ended => false,
    };
    if due { contest.status.next() } else { None }
}
