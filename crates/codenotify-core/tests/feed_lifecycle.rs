//! End-to-end runs of the simulated feed through the timer loop.
//!
//! Time is paused, so periods elapse instantly while contest instants are
//! compared against the real wall clock.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::missing_panics_doc
)]

use std::time::Duration;

use chrono::{TimeDelta, Utc};
use codenotify_core::config::SimulatorConfig;
use codenotify_core::notify::RecordingNotifier;
use codenotify_core::random::SeededRandom;
use codenotify_core::runner::{FeedSchedule, WELCOME_MESSAGE, run_feed};
use codenotify_core::simulator::UpdateSimulator;
use codenotify_core::store::{ContestStore, NoOpRedraw};
use codenotify_types::{Contest, ContestId, ContestStatus, NotificationLevel};

fn contest(id: &str, start_offset: TimeDelta, participants: u64) -> Contest {
    let start_time = Utc::now() + start_offset;
    Contest {
        id: ContestId::from(id),
        name: String::from("Round One"),
        platform: String::from("Codeforces"),
        time: String::new(),
        duration: String::from("2h"),
        status: ContestStatus::Upcoming,
        participants,
        rated: true,
        start_time,
        end_time: start_time + TimeDelta::hours(2),
        registration_url: String::from("https://codeforces.com/contests"),
        tags: vec![String::from("competitive")],
    }
}

fn quiet_simulator(seed: u64) -> UpdateSimulator {
    let config = SimulatorConfig {
        injection_probability: 0.0,
        ..SimulatorConfig::default()
    };
    UpdateSimulator::new(Box::new(SeededRandom::from_seed(seed)), &config)
}

#[tokio::test(start_paused = true)]
async fn overdue_contest_goes_live_on_first_sweep() {
    let seed = vec![contest("c1", TimeDelta::seconds(-1), 100)];
    let mut store = ContestStore::with_contests(seed, Box::new(NoOpRedraw)).unwrap();
    let mut feed = quiet_simulator(7);
    let mut notifier = RecordingNotifier::new();

    // one sweep at 30s, before the first growth firing at 45s
    let summary = run_feed(
        &mut store,
        &mut feed,
        &mut notifier,
        &FeedSchedule::default(),
        tokio::time::sleep(Duration::from_secs(35)),
    )
    .await
    .unwrap();

    assert_eq!(summary.status_sweeps, 1);
    assert_eq!(summary.growth_firings, 0);

    let c1 = store.find_by_id(&ContestId::from("c1")).unwrap();
    assert_eq!(c1.status, ContestStatus::Live);
    assert_eq!(c1.participants, 100);

    assert_eq!(
        notifier.messages(),
        vec![
            "🟢 Connected to contest feed",
            WELCOME_MESSAGE,
            "🚀 Round One has started!",
        ]
    );
    let started = notifier.received().last().unwrap();
    assert_eq!(started.level, NotificationLevel::Info);
}

#[tokio::test(start_paused = true)]
async fn long_run_keeps_store_consistent() {
    let seed = vec![
        contest("future", TimeDelta::hours(6), 10),
        contest("soon", TimeDelta::seconds(-1), 20),
    ];
    let mut store = ContestStore::with_contests(seed, Box::new(NoOpRedraw)).unwrap();
    let mut feed = UpdateSimulator::new(
        Box::new(SeededRandom::from_seed(42)),
        &SimulatorConfig {
            injection_probability: 1.0,
            ..SimulatorConfig::default()
        },
    );
    let mut notifier = RecordingNotifier::new();

    let summary = run_feed(
        &mut store,
        &mut feed,
        &mut notifier,
        &FeedSchedule::default(),
        tokio::time::sleep(Duration::from_secs(600)),
    )
    .await
    .unwrap();

    // every injection firing adds exactly one contest at the front
    let injected = usize::try_from(summary.injection_firings).unwrap();
    assert_eq!(store.len(), 2 + injected);
    assert!(store.contests()[..injected].iter().all(|c| c.id.is_generated()));

    let future = store.find_by_id(&ContestId::from("future")).unwrap();
    assert_eq!(future.status, ContestStatus::Upcoming);
    assert!(future.participants >= 10);

    let soon = store.find_by_id(&ContestId::from("soon")).unwrap();
    assert_eq!(soon.status, ContestStatus::Live);
}
