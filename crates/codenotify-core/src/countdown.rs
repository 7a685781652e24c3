//! Time-until-start labels for the contest list.

use chrono::{DateTime, Utc};

/// Label for how long until `start`, as seen at `now`.
///
/// `"Started"` once `start <= now`; otherwise the two most significant
/// units, e.g. `"2d 5h until start"`, `"3h 12m until start"`, or
/// `"7m until start"`.
pub fn time_until_start(start: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = start.signed_duration_since(now);
    if remaining <= chrono::Duration::zero() {
        return String::from("Started");
    }

    let days = remaining.num_days();
    let hours = remaining.num_hours() % 24;
    let minutes = remaining.num_minutes() % 60;

    if days > 0 {
        format!("{days}d {hours}h until start")
    } else if hours > 0 {
        format!("{hours}h {minutes}m until start")
    } else {
        format!("{minutes}m until start")
    }
}
