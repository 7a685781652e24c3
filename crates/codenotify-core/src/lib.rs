//! Contest store, update simulator, and timer orchestration for CodeNotify.
//!
//! The store owns the contest collection and is the only place contest
//! state is mutated. The simulator stands in for a real upstream feed: three
//! independently scheduled actions sweep statuses, grow participant counts,
//! and inject new contests. The runner drives those actions from tokio
//! timers on a single task.
//!
//! # Modules
//!
//! - [`store`] -- [`ContestStore`] and the [`RedrawHook`] seam.
//! - [`transition`] -- Wall-clock status policy.
//! - [`random`] -- Seedable [`RandomSource`] abstraction.
//! - [`generator`] -- Synthesizes contests for injection.
//! - [`seed`] -- Compiled-in seed contests.
//! - [`feed`] -- [`ContestFeed`] trait and [`FeedEvent`].
//! - [`simulator`] -- [`UpdateSimulator`], the simulated feed.
//! - [`notify`] -- [`Notifier`] seam.
//! - [`runner`] -- Timer loop driving a feed.
//! - [`config`] -- YAML configuration.
//! - [`settings`] -- Key-value persistence of notification preferences.
//! - [`api`] -- Local stand-ins for the remote API.
//! - [`calendar`] -- Per-day contest lookup and month view.
//! - [`countdown`] -- Time-until-start labels.
//! - [`actions`] -- Per-status contest actions.
//!
//! [`ContestStore`]: store::ContestStore
//! [`RedrawHook`]: store::RedrawHook
//! [`RandomSource`]: random::RandomSource
//! [`ContestFeed`]: feed::ContestFeed
//! [`FeedEvent`]: feed::FeedEvent
//! [`UpdateSimulator`]: simulator::UpdateSimulator
//! [`Notifier`]: notify::Notifier

pub mod actions;
pub mod api;
pub mod calendar;
pub mod config;
pub mod countdown;
pub mod feed;
pub mod generator;
pub mod notify;
pub mod random;
pub mod runner;
pub mod seed;
pub mod settings;
pub mod simulator;
pub mod store;
pub mod transition;
