//! Core record types: contests and notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{ContestStatus, NotificationLevel};
use crate::ids::ContestId;

/// One trackable competitive-programming event.
///
/// `start_time < end_time` always holds for contests built by the seed list
/// and the generator. `time` and `duration` are display strings and are
/// never parsed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    /// Unique identifier, stable for seed contests.
    pub id: ContestId,
    /// Human-readable contest name.
    pub name: String,
    /// Hosting platform (Codeforces, `AtCoder`, ...).
    pub platform: String,
    /// Display start time, e.g. `Dec 10, 2024 14:35`.
    pub time: String,
    /// Display duration, e.g. `1h 40m`.
    pub duration: String,
    /// Stored lifecycle status.
    pub status: ContestStatus,
    /// Registered participant count.
    pub participants: u64,
    /// Whether the contest affects ratings.
    pub rated: bool,
    /// Instant the contest starts.
    pub start_time: DateTime<Utc>,
    /// Instant the contest ends.
    pub end_time: DateTime<Utc>,
    /// Where users register or join.
    pub registration_url: String,
    /// Ordered descriptive tags.
    pub tags: Vec<String>,
}

/// A user-facing message handed to the notification collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Message text.
    pub message: String,
    /// Severity.
    pub level: NotificationLevel,
}

impl Notification {
    /// Build an informational notification.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
        }
    }

    /// Build a success notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn contest_uses_camel_case_fields() {
        let start = Utc.with_ymd_and_hms(2024, 12, 10, 14, 35, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 12, 10, 16, 35, 0).unwrap();
        let contest = Contest {
            id: ContestId::from("cf_900_div2"),
            name: String::from("Codeforces Round #900 (Div. 2)"),
            platform: String::from("Codeforces"),
            time: String::from("Dec 10, 2024 14:35"),
            duration: String::from("2h"),
            status: ContestStatus::Upcoming,
            participants: 25_420,
            rated: true,
            start_time: start,
            end_time: end,
            registration_url: String::from("https://codeforces.com/contests"),
            tags: vec![String::from("competitive")],
        };

        let value = serde_json::to_value(&contest).unwrap();
        assert_eq!(value["registrationUrl"], "https://codeforces.com/contests");
        assert_eq!(value["status"], "Upcoming");
        assert!(value.get("startTime").is_some());

        let back: Contest = serde_json::from_value(value).unwrap();
        assert_eq!(back, contest);
    }
}
