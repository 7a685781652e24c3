//! Synthesizes contests for the simulated feed's injection action.
//!
//! Generated contests are always `Upcoming`, start 1 to 30 days after
//! `now` at a random UTC hour and minute, and run for 1 to 3 hours plus up
//! to 59 minutes. The display duration is derived from the actual window.

use chrono::{DateTime, Days, Duration, Utc};
use codenotify_types::{Contest, ContestId, ContestStatus};

use crate::random::RandomSource;

/// Platforms a generated contest can be hosted on.
pub const PLATFORMS: &[&str] = &["Codeforces", "AtCoder", "LeetCode", "CodeChef", "HackerRank"];

/// Contest kinds used in generated names.
pub const CONTEST_KINDS: &[&str] = &["Round", "Contest", "Challenge", "Competition"];

/// Difficulty tags for generated contests.
pub const DIFFICULTIES: &[&str] = &["Beginner", "Intermediate", "Advanced"];

/// Probability that a generated contest is rated.
const RATED_PROBABILITY: f64 = 0.7;

/// Display format for contest start times.
pub const DISPLAY_TIME_FORMAT: &str = "%b %-d, %Y %H:%M";

/// Builds random `Upcoming` contests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContestGenerator;

impl ContestGenerator {
    /// Create a generator.
    pub const fn new() -> Self {
        Self
    }

    /// Generate one contest relative to `now`.
    pub fn generate(&self, rng: &mut dyn RandomSource, now: DateTime<Utc>) -> Contest {
        let platform = pick(rng, PLATFORMS);
        let kind = pick(rng, CONTEST_KINDS);
        let difficulty = pick(rng, DIFFICULTIES);

        let day_offset = rng.range(1, 30);
        let hour = rng.range(0, 23);
        let minute = rng.range(0, 59);
        let start_time = start_instant(now, day_offset, hour, minute);

        let span_minutes = rng
            .range(1, 3)
            .saturating_mul(60)
            .saturating_add(rng.range(0, 59));
        let span = Duration::minutes(i64::try_from(span_minutes).unwrap_or(60));
        let end_time = start_time
            .checked_add_signed(span)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let number = rng.range(0, 999);
        let participants = rng.range(1000, 20_999);
        let rated = rng.chance(RATED_PROBABILITY);
        let id = ContestId::generated(rng.bytes());

        Contest {
            id,
            name: format!("{platform} {kind} #{number}"),
            platform: platform.to_owned(),
            time: start_time.format(DISPLAY_TIME_FORMAT).to_string(),
            duration: format_duration(span_minutes),
            status: ContestStatus::Upcoming,
            participants,
            rated,
            start_time,
            end_time,
            registration_url: format!("https://{}.com/contests", platform.to_lowercase()),
            tags: vec![
                difficulty.to_lowercase(),
                String::from("competitive"),
                String::from("algorithm"),
            ],
        }
    }
}

/// Render a span in minutes as `"2h"` or `"1h 40m"`.
pub fn format_duration(total_minutes: u64) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if minutes == 0 {
        format!("{hours}h")
    } else if hours == 0 {
        format!("{minutes}m")
    } else {
        format!("{hours}h {minutes}m")
    }
}

fn pick(rng: &mut dyn RandomSource, options: &'static [&'static str]) -> &'static str {
    rng.index(options.len())
        .and_then(|i| options.get(i))
        .copied()
        .unwrap_or_default()
}

fn start_instant(now: DateTime<Utc>, day_offset: u64, hour: u64, minute: u64) -> DateTime<Utc> {
    let h = u32::try_from(hour).unwrap_or(0);
    let m = u32::try_from(minute).unwrap_or(0);
    now.date_naive()
        .checked_add_days(Days::new(day_offset))
        .and_then(|date| date.and_hms_opt(h, m, 0))
        .map_or_else(
            || {
                now.checked_add_signed(Duration::days(i64::try_from(day_offset).unwrap_or(1)))
                    .unwrap_or(now)
            },
            |naive| naive.and_utc(),
        )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Timelike};

    use super::*;
    use crate::random::SeededRandom;
    use crate::random::tests::ScriptedRandom;

    #[test]
    fn generated_contests_are_upcoming_and_well_formed() {
        let now = Utc::now();
        let mut rng = SeededRandom::from_seed(99);
        let generator = ContestGenerator::new();

        for _ in 0..100 {
            let c = generator.generate(&mut rng, now);
            assert_eq!(c.status, ContestStatus::Upcoming);
            assert!(c.start_time > now);
            assert!(c.start_time < c.end_time);
            assert!(c.end_time - c.start_time >= Duration::hours(1));
            assert!(c.end_time - c.start_time < Duration::hours(4));
            assert!((1000..=20_999).contains(&c.participants));
            assert!(PLATFORMS.contains(&c.platform.as_str()));
            assert!(c.id.is_generated());
            assert_eq!(c.tags.len(), 3);
            assert!(c.name.starts_with(&c.platform));
        }
    }

    #[test]
    fn scripted_choices_shape_the_contest() {
        let now = Utc.with_ymd_and_hms(2024, 12, 1, 8, 0, 0).unwrap();
        let mut rng = ScriptedRandom {
            // platform AtCoder, kind Contest, difficulty Advanced
            indices: [1, 1, 2].into(),
            // day +9, 21:05, span 1h 40m, #332, 12850 participants, id bytes
            values: [9, 21, 5, 1, 40, 332, 12_850, 0].into(),
            chances: [true].into(),
        };

        let c = ContestGenerator::new().generate(&mut rng, now);

        assert_eq!(c.name, "AtCoder Contest #332");
        assert_eq!(c.platform, "AtCoder");
        assert_eq!(c.start_time, Utc.with_ymd_and_hms(2024, 12, 10, 21, 5, 0).unwrap());
        assert_eq!(c.end_time.hour(), 22);
        assert_eq!(c.end_time.minute(), 45);
        assert_eq!(c.duration, "1h 40m");
        assert_eq!(c.time, "Dec 10, 2024 21:05");
        assert_eq!(c.participants, 12_850);
        assert!(c.rated);
        assert_eq!(c.registration_url, "https://atcoder.com/contests");
        assert_eq!(c.tags, vec!["advanced", "competitive", "algorithm"]);
    }

    #[test]
    fn durations_render_compactly() {
        assert_eq!(format_duration(120), "2h");
        assert_eq!(format_duration(100), "1h 40m");
        assert_eq!(format_duration(45), "45m");
    }
}
