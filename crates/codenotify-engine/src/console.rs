//! Console collaborators: the redraw hook and the notifier.
//!
//! Both write through `tracing`, so output follows the configured filter.
//! Contest lines are emitted at `debug`; the per-redraw summary and every
//! notification at `info`.

use chrono::{DateTime, Datelike, Utc};
use codenotify_core::actions::ContestAction;
use codenotify_core::calendar::MonthView;
use codenotify_core::countdown::time_until_start;
use codenotify_core::notify::Notifier;
use codenotify_core::store::RedrawHook;
use codenotify_types::{Contest, ContestStatus, Notification};
use tracing::{debug, info};

/// Redraws the contest list as log lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleRenderer;

impl RedrawHook for ConsoleRenderer {
    fn redraw(&mut self, contests: &[Contest]) {
        let now = Utc::now();
        for contest in contests {
            debug!("{}", contest_line(contest, now));
        }

        let live = contests
            .iter()
            .filter(|c| c.status == ContestStatus::Live)
            .count();
        let today = now.date_naive();
        let active_days = MonthView::build(contests, today.year(), today.month(), today)
            .map_or(0, |view| view.active_days().count());

        info!(
            contests = contests.len(),
            live,
            active_days_this_month = active_days,
            "contest list redrawn"
        );
    }
}

/// One display line for a contest card.
pub fn contest_line(contest: &Contest, now: DateTime<Utc>) -> String {
    let countdown = match contest.status {
        ContestStatus::Upcoming => time_until_start(contest.start_time, now),
        ContestStatus::Live => String::from("Started"),
        ContestStatus::Ended => String::from("Finished"),
    };
    let rated = if contest.rated { " | Rated" } else { "" };
    format!(
        "[{status}] {platform} | {name} | {time} | {duration} | {participants} participants{rated} | {countdown} | {action}",
        status = contest.status.label(),
        platform = contest.platform,
        name = contest.name,
        time = contest.time,
        duration = contest.duration,
        participants = contest.participants,
        action = ContestAction::for_status(contest.status).label(),
    )
}

/// Logs each notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, notification: &Notification) {
        info!(level = %notification.level, "{}", notification.message);
    }
}
