//! Timer loop driving a contest feed.
//!
//! [`run_feed`] owns the store for the duration of the run and multiplexes
//! every timer on one task with `tokio::select!`:
//!
//! - one-shot connected and welcome notifications,
//! - the three feed actions on independent periods,
//! - a countdown refresh that redraws without mutating.
//!
//! Only one branch body runs at a time, so the store needs no lock. Branch
//! selection is unbiased; when several timers are ready together their
//! order is unspecified. A store guard failure ends the run with an error.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use codenotify_types::Notification;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::{MAX_PERIOD_SECS, SimulatorConfig};
use crate::feed::{ContestFeed, FeedAction, FeedError, FeedEvent};
use crate::notify::Notifier;
use crate::store::ContestStore;

/// Message of the one-shot welcome notification.
pub const WELCOME_MESSAGE: &str = "🎉 Welcome to CodeNotify! Real-time updates are active";

/// Errors that end a feed run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The feed rejected an action.
    #[error("feed error: {source}")]
    Feed {
        /// The underlying feed error.
        #[from]
        source: FeedError,
    },
}

/// Timer periods and one-shot delays for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSchedule {
    /// Status sweep period.
    pub status_sweep: Duration,
    /// Participant growth period.
    pub participant_growth: Duration,
    /// Contest injection period.
    pub contest_injection: Duration,
    /// Countdown refresh period.
    pub refresh: Duration,
    /// Delay of the connected notification.
    pub connect_delay: Duration,
    /// Delay of the welcome notification.
    pub welcome_delay: Duration,
}

impl FeedSchedule {
    /// Build a schedule from simulator configuration.
    pub const fn from_config(config: &SimulatorConfig) -> Self {
        Self {
            status_sweep: config.status_sweep(),
            participant_growth: config.participant_growth(),
            contest_injection: config.contest_injection(),
            refresh: config.refresh(),
            connect_delay: config.connect_delay(),
            welcome_delay: config.welcome_delay(),
        }
    }
}

impl Default for FeedSchedule {
    fn default() -> Self {
        Self::from_config(&SimulatorConfig::default())
    }
}

/// Counters for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Status sweeps fired.
    pub status_sweeps: u64,
    /// Participant growth firings.
    pub growth_firings: u64,
    /// Contest injection firings (including ones the probability gate skipped).
    pub injection_firings: u64,
    /// Countdown refreshes.
    pub refreshes: u64,
    /// Notifications delivered.
    pub notifications: u64,
}

/// Drive `feed` against `store` until `shutdown` resolves.
///
/// Each periodic timer first fires one full period after the start; missed
/// ticks are delayed rather than bursted.
///
/// # Errors
///
/// Returns [`RunnerError::Feed`] as soon as the feed reports an error.
pub async fn run_feed<S>(
    store: &mut ContestStore,
    feed: &mut dyn ContestFeed,
    notifier: &mut dyn Notifier,
    schedule: &FeedSchedule,
    shutdown: S,
) -> Result<RunSummary, RunnerError>
where
    S: Future<Output = ()>,
{
    let mut summary = RunSummary::default();

    let mut sweep = periodic(schedule.status_sweep);
    let mut growth = periodic(schedule.participant_growth);
    let mut injection = periodic(schedule.contest_injection);
    let mut refresh = periodic(schedule.refresh);

    let connect = tokio::time::sleep(schedule.connect_delay);
    let welcome = tokio::time::sleep(schedule.welcome_delay);
    tokio::pin!(connect, welcome, shutdown);
    let mut connected = false;
    let mut welcomed = false;

    info!(
        contests = store.len(),
        status_sweep_secs = schedule.status_sweep.as_secs(),
        participant_growth_secs = schedule.participant_growth.as_secs(),
        contest_injection_secs = schedule.contest_injection.as_secs(),
        "feed starting"
    );

    loop {
        tokio::select! {
            () = &mut shutdown => {
                info!("feed shutdown requested");
                break;
            }
            () = &mut connect, if !connected => {
                connected = true;
                deliver(notifier, &mut summary, &[FeedEvent::Connected]);
            }
            () = &mut welcome, if !welcomed => {
                welcomed = true;
                notify_once(notifier, &mut summary, &Notification::success(WELCOME_MESSAGE));
            }
            _ = sweep.tick() => {
                summary.status_sweeps = summary.status_sweeps.saturating_add(1);
                fire(feed, store, notifier, &mut summary, FeedAction::StatusSweep)?;
            }
            _ = growth.tick() => {
                summary.growth_firings = summary.growth_firings.saturating_add(1);
                fire(feed, store, notifier, &mut summary, FeedAction::ParticipantGrowth)?;
            }
            _ = injection.tick() => {
                summary.injection_firings = summary.injection_firings.saturating_add(1);
                fire(feed, store, notifier, &mut summary, FeedAction::ContestInjection)?;
            }
            _ = refresh.tick() => {
                summary.refreshes = summary.refreshes.saturating_add(1);
                store.refresh();
            }
        }
    }

    Ok(summary)
}

/// Log the counters of a finished run.
pub fn log_run_end(summary: &RunSummary) {
    info!(
        status_sweeps = summary.status_sweeps,
        growth_firings = summary.growth_firings,
        injection_firings = summary.injection_firings,
        refreshes = summary.refreshes,
        notifications = summary.notifications,
        "feed stopped"
    );
}

fn periodic(period: Duration) -> Interval {
    // interval_at panics on a zero period; huge periods overflow Instant
    let period = period.clamp(Duration::from_millis(1), Duration::from_secs(MAX_PERIOD_SECS));
    let now = Instant::now();
    let start = now.checked_add(period).unwrap_or(now);
    let mut interval = tokio::time::interval_at(start, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

fn fire(
    feed: &mut dyn ContestFeed,
    store: &mut ContestStore,
    notifier: &mut dyn Notifier,
    summary: &mut RunSummary,
    action: FeedAction,
) -> Result<(), RunnerError> {
    let events = feed.poll(action, store, Utc::now()).inspect_err(|e| {
        warn!(?action, error = %e, "feed action failed");
    })?;
    debug!(?action, events = events.len(), "feed action applied");
    deliver(notifier, summary, &events);
    Ok(())
}

fn deliver(notifier: &mut dyn Notifier, summary: &mut RunSummary, events: &[FeedEvent]) {
    for event in events {
        debug!(kind = event.kind(), "feed event");
        notify_once(notifier, summary, &event.notification());
    }
}

fn notify_once(notifier: &mut dyn Notifier, summary: &mut RunSummary, notification: &Notification) {
    notifier.notify(notification);
    summary.notifications = summary.notifications.saturating_add(1);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::DateTime;
    use codenotify_types::ContestId;

    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::store::{NoOpRedraw, StoreError};

    /// Feed that records which actions fired and reports one event each.
    struct ScriptedFeed {
        fired: Arc<Mutex<Vec<FeedAction>>>,
        fail_on: Option<FeedAction>,
    }

    impl ContestFeed for ScriptedFeed {
        fn poll(
            &mut self,
            action: FeedAction,
            _store: &mut ContestStore,
            _now: DateTime<Utc>,
        ) -> Result<Vec<FeedEvent>, FeedError> {
            if self.fail_on == Some(action) {
                return Err(StoreError::InvalidDelta { delta: 0 }.into());
            }
            self.fired.lock().unwrap().push(action);
            Ok(vec![FeedEvent::NewContest {
                id: ContestId::from("x"),
                name: format!("{action:?}"),
            }])
        }
    }

    fn schedule() -> FeedSchedule {
        FeedSchedule {
            status_sweep: Duration::from_secs(30),
            participant_growth: Duration::from_secs(45),
            contest_injection: Duration::from_secs(90),
            refresh: Duration::from_secs(60),
            connect_delay: Duration::from_secs(1),
            welcome_delay: Duration::from_secs(2),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn timers_fire_on_their_own_periods() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let mut feed = ScriptedFeed {
            fired: Arc::clone(&fired),
            fail_on: None,
        };
        let mut store = ContestStore::new(Box::new(NoOpRedraw));
        let mut notifier = RecordingNotifier::new();

        let summary = run_feed(
            &mut store,
            &mut feed,
            &mut notifier,
            &schedule(),
            tokio::time::sleep(Duration::from_secs(100)),
        )
        .await
        .unwrap();

        assert_eq!(summary.status_sweeps, 3);
        assert_eq!(summary.growth_firings, 2);
        assert_eq!(summary.injection_firings, 1);
        assert_eq!(summary.refreshes, 1);
        // connected + welcome + one event per firing
        assert_eq!(summary.notifications, 8);
        assert_eq!(fired.lock().unwrap().len(), 6);

        let messages = notifier.messages();
        assert_eq!(messages.first().copied(), Some("🟢 Connected to contest feed"));
        assert_eq!(messages.get(1).copied(), Some(WELCOME_MESSAGE));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_before_first_tick_fires_nothing() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let mut feed = ScriptedFeed {
            fired: Arc::clone(&fired),
            fail_on: None,
        };
        let mut store = ContestStore::new(Box::new(NoOpRedraw));
        let mut notifier = RecordingNotifier::new();

        let summary = run_feed(
            &mut store,
            &mut feed,
            &mut notifier,
            &schedule(),
            tokio::time::sleep(Duration::from_millis(500)),
        )
        .await
        .unwrap();

        assert_eq!(summary, RunSummary::default());
        assert!(fired.lock().unwrap().is_empty());
        assert!(notifier.received().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn feed_error_stops_the_run() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let mut feed = ScriptedFeed {
            fired: Arc::clone(&fired),
            fail_on: Some(FeedAction::ParticipantGrowth),
        };
        let mut store = ContestStore::new(Box::new(NoOpRedraw));
        let mut notifier = RecordingNotifier::new();

        let result = run_feed(
            &mut store,
            &mut feed,
            &mut notifier,
            &schedule(),
            tokio::time::sleep(Duration::from_secs(1_000)),
        )
        .await;

        assert!(matches!(result, Err(RunnerError::Feed { .. })));
        // only the sweep at 30s ran before growth failed at 45s
        assert_eq!(*fired.lock().unwrap(), vec![FeedAction::StatusSweep]);
    }

    #[tokio::test(start_paused = true)]
    async fn oversized_period_is_clamped_not_overflowed() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let mut feed = ScriptedFeed {
            fired: Arc::clone(&fired),
            fail_on: None,
        };
        let mut store = ContestStore::new(Box::new(NoOpRedraw));
        let mut notifier = RecordingNotifier::new();
        let schedule = FeedSchedule {
            contest_injection: Duration::from_secs(u64::MAX),
            ..schedule()
        };

        let summary = run_feed(
            &mut store,
            &mut feed,
            &mut notifier,
            &schedule,
            tokio::time::sleep(Duration::from_secs(100)),
        )
        .await
        .unwrap();

        assert_eq!(summary.injection_firings, 0);
        assert_eq!(summary.status_sweeps, 3);
    }

    #[test]
    fn schedule_follows_config() {
        let schedule = FeedSchedule::default();
        assert_eq!(schedule.status_sweep, Duration::from_secs(30));
        assert_eq!(schedule.participant_growth, Duration::from_secs(45));
        assert_eq!(schedule.contest_injection, Duration::from_secs(90));
        assert_eq!(schedule.connect_delay, Duration::from_secs(1));
    }
}
