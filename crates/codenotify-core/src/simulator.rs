//! Simulated contest feed.
//!
//! [`UpdateSimulator`] implements the three scheduled actions:
//!
//! 1. **Status sweep** -- scan the whole collection and apply each due
//!    transition once ([`transition::due_transition`]).
//! 2. **Participant growth** -- pick one contest uniformly; if it is
//!    `Upcoming`, grow it by a bounded random amount.
//! 3. **Contest injection** -- with probability `p`, prepend a freshly
//!    generated `Upcoming` contest.
//!
//! A growth pick that lands on a non-`Upcoming` contest does nothing; it is
//! not retried on another contest. Empty collections are a no-op for sweep
//! and growth.

use chrono::{DateTime, Utc};
use codenotify_types::{ContestId, ContestStatus};
use tracing::{debug, info};

use crate::config::SimulatorConfig;
use crate::feed::{ContestFeed, FeedAction, FeedError, FeedEvent};
use crate::generator::ContestGenerator;
use crate::random::RandomSource;
use crate::store::{ContestStore, StoreError};
use crate::transition;

/// The simulated stand-in for an upstream contest feed.
pub struct UpdateSimulator {
    rng: Box<dyn RandomSource>,
    generator: ContestGenerator,
    growth_min: u64,
    growth_max: u64,
    injection_probability: f64,
}

impl core::fmt::Debug for UpdateSimulator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UpdateSimulator")
            .field("growth_min", &self.growth_min)
            .field("growth_max", &self.growth_max)
            .field("injection_probability", &self.injection_probability)
            .finish_non_exhaustive()
    }
}

impl UpdateSimulator {
    /// Create a simulator drawing its choices from `rng`.
    pub fn new(rng: Box<dyn RandomSource>, config: &SimulatorConfig) -> Self {
        Self {
            rng,
            generator: ContestGenerator::new(),
            growth_min: config.growth_min,
            growth_max: config.growth_max,
            injection_probability: config.injection_probability,
        }
    }

    /// Apply every due status transition, one step per contest.
    pub fn sweep_status(&mut self, store: &mut ContestStore, now: DateTime<Utc>) -> Vec<FeedEvent> {
        let due: Vec<(ContestId, String, ContestStatus)> = store
            .contests()
            .iter()
            .filter_map(|c| {
                transition::due_transition(c, now).map(|next| (c.id.clone(), c.name.clone(), next))
            })
            .collect();

        let mut events = Vec::with_capacity(due.len());
        for (id, name, next) in due {
            let event = match next {
                ContestStatus::Live => FeedEvent::ContestStarted { id: id.clone(), name },
                ContestStatus::Ended => FeedEvent::ContestEnded { id: id.clone(), name },
                // due_transition never yields Upcoming
                ContestStatus::Upcoming => continue,
            };
            if store.update_status(&id, next) {
                info!(contest_id = %id, status = %next, "contest status advanced");
                events.push(event);
            }
        }
        events
    }

    /// Grow one randomly chosen contest, if it is `Upcoming`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidDelta`] if the configured growth bounds
    /// produce a non-positive amount.
    pub fn grow_participants(
        &mut self,
        store: &mut ContestStore,
    ) -> Result<Option<FeedEvent>, StoreError> {
        let Some(index) = self.rng.index(store.len()) else {
            return Ok(None);
        };
        let Some(contest) = store.get(index) else {
            return Ok(None);
        };
        if contest.status != ContestStatus::Upcoming {
            debug!(contest_id = %contest.id, status = %contest.status, "growth skipped");
            return Ok(None);
        }
        let id = contest.id.clone();
        let name = contest.name.clone();

        let amount = self.rng.range(self.growth_min, self.growth_max);
        let delta = i64::try_from(amount).unwrap_or(i64::MAX);
        let grown = store.increment_participants(&id, delta)?;

        Ok(grown.map(|participants| FeedEvent::ParticipantUpdate {
            id,
            name,
            participants,
        }))
    }

    /// With the configured probability, prepend a generated contest.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] if the generated id collides.
    pub fn inject_contest(
        &mut self,
        store: &mut ContestStore,
        now: DateTime<Utc>,
    ) -> Result<Option<FeedEvent>, StoreError> {
        if !self.rng.chance(self.injection_probability) {
            debug!("injection skipped");
            return Ok(None);
        }
        let contest = self.generator.generate(self.rng.as_mut(), now);
        let id = contest.id.clone();
        let name = contest.name.clone();
        store.insert_front(contest)?;
        info!(contest_id = %id, name = %name, "contest injected");
        Ok(Some(FeedEvent::NewContest { id, name }))
    }
}

impl ContestFeed for UpdateSimulator {
    fn poll(
        &mut self,
        action: FeedAction,
        store: &mut ContestStore,
        now: DateTime<Utc>,
    ) -> Result<Vec<FeedEvent>, FeedError> {
        let events = match action {
            FeedAction::StatusSweep => self.sweep_status(store, now),
            FeedAction::ParticipantGrowth => self.grow_participants(store)?.into_iter().collect(),
            FeedAction::ContestInjection => self.inject_contest(store, now)?.into_iter().collect(),
        };
        Ok(events)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::random::SeededRandom;
    use crate::random::tests::ScriptedRandom;
    use crate::store::NoOpRedraw;
    use crate::store::tests::make_contest;

    fn store_of(contests: Vec<codenotify_types::Contest>) -> ContestStore {
        ContestStore::with_contests(contests, Box::new(NoOpRedraw)).unwrap()
    }

    fn scripted(rng: ScriptedRandom) -> UpdateSimulator {
        UpdateSimulator::new(Box::new(rng), &SimulatorConfig::default())
    }

    #[test]
    fn sweep_starts_contest_past_its_start() {
        let now = Utc::now();
        let mut c1 = make_contest("c1", ContestStatus::Upcoming, 100);
        c1.start_time = now - Duration::seconds(1);
        c1.end_time = now + Duration::hours(2);
        let mut store = store_of(vec![c1]);
        let mut sim = scripted(ScriptedRandom::default());

        let events = sim.sweep_status(&mut store, now);

        let contest = store.find_by_id(&ContestId::from("c1")).unwrap();
        assert_eq!(contest.status, ContestStatus::Live);
        assert_eq!(contest.participants, 100);
        assert!(matches!(
            &events[..],
            [FeedEvent::ContestStarted { id, .. }] if id.as_str() == "c1"
        ));
    }

    #[test]
    fn sweep_ends_live_contest_past_its_end() {
        let now = Utc::now();
        let mut c1 = make_contest("c1", ContestStatus::Live, 100);
        c1.start_time = now - Duration::hours(2);
        c1.end_time = now - Duration::seconds(1);
        let mut store = store_of(vec![c1]);
        let mut sim = scripted(ScriptedRandom::default());

        let events = sim.sweep_status(&mut store, now);

        assert_eq!(
            store.find_by_id(&ContestId::from("c1")).unwrap().status,
            ContestStatus::Ended
        );
        assert!(matches!(&events[..], [FeedEvent::ContestEnded { .. }]));
    }

    #[test]
    fn sweep_is_idempotent() {
        let now = Utc::now();
        let mut c1 = make_contest("c1", ContestStatus::Live, 1);
        c1.start_time = now - Duration::hours(2);
        c1.end_time = now - Duration::seconds(1);
        let mut store = store_of(vec![c1]);
        let mut sim = scripted(ScriptedRandom::default());

        assert_eq!(sim.sweep_status(&mut store, now).len(), 1);
        assert!(sim.sweep_status(&mut store, now).is_empty());
        assert!(sim.sweep_status(&mut store, now + Duration::days(1)).is_empty());
    }

    #[test]
    fn overdue_upcoming_takes_two_sweeps_to_end() {
        let now = Utc::now();
        let mut c1 = make_contest("c1", ContestStatus::Upcoming, 1);
        c1.start_time = now - Duration::hours(3);
        c1.end_time = now - Duration::hours(1);
        let mut store = store_of(vec![c1]);
        let mut sim = scripted(ScriptedRandom::default());
        let id = ContestId::from("c1");

        let first = sim.sweep_status(&mut store, now);
        assert!(matches!(&first[..], [FeedEvent::ContestStarted { .. }]));
        assert_eq!(store.find_by_id(&id).unwrap().status, ContestStatus::Live);

        let second = sim.sweep_status(&mut store, now);
        assert!(matches!(&second[..], [FeedEvent::ContestEnded { .. }]));
        assert_eq!(store.find_by_id(&id).unwrap().status, ContestStatus::Ended);
    }

    #[test]
    fn sweep_on_empty_store_is_noop() {
        let mut store = store_of(Vec::new());
        let mut sim = scripted(ScriptedRandom::default());
        assert!(sim.sweep_status(&mut store, Utc::now()).is_empty());
    }

    #[test]
    fn growth_increments_upcoming_pick() {
        let mut store = store_of(vec![
            make_contest("a", ContestStatus::Live, 10),
            make_contest("b", ContestStatus::Upcoming, 10),
        ]);
        let mut sim = scripted(ScriptedRandom {
            indices: [1].into(),
            values: [42].into(),
            ..ScriptedRandom::default()
        });

        let event = sim.grow_participants(&mut store).unwrap();

        assert_eq!(
            event,
            Some(FeedEvent::ParticipantUpdate {
                id: ContestId::from("b"),
                name: String::from("Contest b"),
                participants: 52,
            })
        );
    }

    #[test]
    fn growth_on_ended_pick_changes_nothing() {
        let mut store = store_of(vec![
            make_contest("done", ContestStatus::Ended, 10),
            make_contest("b", ContestStatus::Upcoming, 10),
        ]);
        let mut sim = scripted(ScriptedRandom {
            indices: [0].into(),
            values: [42].into(),
            ..ScriptedRandom::default()
        });

        assert_eq!(sim.grow_participants(&mut store).unwrap(), None);
        assert_eq!(store.get(0).unwrap().participants, 10);
        assert_eq!(store.get(1).unwrap().participants, 10);
    }

    #[test]
    fn growth_on_empty_store_is_noop() {
        let mut store = store_of(Vec::new());
        let mut sim = scripted(ScriptedRandom::default());
        assert_eq!(sim.grow_participants(&mut store).unwrap(), None);
    }

    #[test]
    fn injection_respects_probability_gate() {
        let mut store = store_of(vec![make_contest("c1", ContestStatus::Upcoming, 1)]);
        let mut sim = scripted(ScriptedRandom {
            chances: [false, true].into(),
            values: [0; 20].into(),
            ..ScriptedRandom::default()
        });
        let now = Utc::now();

        assert_eq!(sim.inject_contest(&mut store, now).unwrap(), None);
        assert_eq!(store.len(), 1);

        let event = sim.inject_contest(&mut store, now).unwrap();
        assert_eq!(store.len(), 2);
        let front = store.get(0).unwrap();
        assert_eq!(front.status, ContestStatus::Upcoming);
        assert_eq!(
            event,
            Some(FeedEvent::NewContest {
                id: front.id.clone(),
                name: front.name.clone(),
            })
        );
    }

    #[test]
    fn colliding_generated_id_fails_fast() {
        // Identical scripted draws produce identical ids.
        let mut store = store_of(Vec::new());
        let mut sim = scripted(ScriptedRandom {
            // gate, rated, gate
            chances: [true, true, true].into(),
            ..ScriptedRandom::default()
        });
        let now = Utc::now();

        assert!(sim.inject_contest(&mut store, now).unwrap().is_some());
        let err = sim.inject_contest(&mut store, now).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId { .. }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn statuses_never_regress_and_ended_counts_freeze() {
        let start = Utc::now();
        let mut seed = Vec::new();
        for i in 0..6_i64 {
            let mut c = make_contest(&format!("c{i}"), ContestStatus::Upcoming, 100);
            c.start_time = start + Duration::minutes(i * 10);
            c.end_time = c.start_time + Duration::minutes(25);
            seed.push(c);
        }
        let mut store = store_of(seed);
        let config = SimulatorConfig {
            injection_probability: 0.5,
            ..SimulatorConfig::default()
        };
        let mut sim = UpdateSimulator::new(Box::new(SeededRandom::from_seed(3)), &config);

        let mut previous = store.contests().to_vec();
        for step in 0..200_i64 {
            let now = start + Duration::minutes(step);
            let action = match step % 3 {
                0 => FeedAction::StatusSweep,
                1 => FeedAction::ParticipantGrowth,
                _ => FeedAction::ContestInjection,
            };
            sim.poll(action, &mut store, now).unwrap();

            for before in &previous {
                let after = store.find_by_id(&before.id).unwrap();
                assert!(after.status.rank() >= before.status.rank());
                assert!(after.participants >= before.participants);
                if before.status == ContestStatus::Ended {
                    assert_eq!(after.participants, before.participants);
                }
            }
            previous = store.contests().to_vec();
        }
    }
}
