//! Compiled-in seed contests.
//!
//! The store starts from this list on every launch; simulated changes are
//! never persisted.

use chrono::{DateTime, TimeZone, Utc};
use codenotify_types::{Contest, ContestId, ContestStatus};

/// Fixed UTC instant. The arguments below are all valid calendar values.
fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|&t| t.to_owned()).collect()
}

/// The seed contest list, in display order.
pub fn seed_contests() -> Vec<Contest> {
    vec![
        Contest {
            id: ContestId::from("cf_900_div2"),
            name: String::from("Codeforces Round #900 (Div. 2)"),
            platform: String::from("Codeforces"),
            time: String::from("Dec 10, 2024 14:35"),
            duration: String::from("2h"),
            status: ContestStatus::Upcoming,
            participants: 25_420,
            rated: true,
            start_time: utc(2024, 12, 10, 14, 35),
            end_time: utc(2024, 12, 10, 16, 35),
            registration_url: String::from("https://codeforces.com/contests"),
            tags: tags(&["competitive", "algorithm", "data-structures"]),
        },
        Contest {
            id: ContestId::from("atcoder_abc332"),
            name: String::from("AtCoder Beginner Contest 332"),
            platform: String::from("AtCoder"),
            time: String::from("Dec 10, 2024 21:00"),
            duration: String::from("1h 40m"),
            status: ContestStatus::Upcoming,
            participants: 12_850,
            rated: true,
            start_time: utc(2024, 12, 10, 21, 0),
            end_time: utc(2024, 12, 10, 22, 40),
            registration_url: String::from("https://atcoder.jp/contests"),
            tags: tags(&["beginner", "competitive", "algorithm"]),
        },
        Contest {
            id: ContestId::from("leetcode_wc375"),
            name: String::from("LeetCode Weekly Contest 375"),
            platform: String::from("LeetCode"),
            time: String::from("Dec 11, 2024 02:30"),
            duration: String::from("1h 30m"),
            status: ContestStatus::Live,
            participants: 15_630,
            rated: true,
            start_time: utc(2024, 12, 11, 2, 30),
            end_time: utc(2024, 12, 11, 4, 0),
            registration_url: String::from("https://leetcode.com/contest"),
            tags: tags(&["weekly", "competitive", "algorithm"]),
        },
        Contest {
            id: ContestId::from("codechef_starters112"),
            name: String::from("CodeChef Starters 112"),
            platform: String::from("CodeChef"),
            time: String::from("Dec 11, 2024 20:00"),
            duration: String::from("3h"),
            status: ContestStatus::Upcoming,
            participants: 8420,
            rated: true,
            start_time: utc(2024, 12, 11, 20, 0),
            end_time: utc(2024, 12, 11, 23, 0),
            registration_url: String::from("https://www.codechef.com/START"),
            tags: tags(&["starters", "competitive", "algorithm"]),
        },
    ]
}
