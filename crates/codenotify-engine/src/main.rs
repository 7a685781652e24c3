//! CodeNotify binary.
//!
//! Seeds the contest store, restores saved notification preferences, and
//! runs the simulated live feed until interrupted or until the configured
//! runtime bound elapses.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `codenotify-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Build the contest store from the seed list
//! 4. Restore saved preferences and submit configured ones
//! 5. Perform the initial contest fetch
//! 6. Run the feed loop
//! 7. Log the result

mod console;
mod error;

use std::path::Path;
use std::time::Duration;

use codenotify_core::api::MockApi;
use codenotify_core::config::{CONFIG_FILE, CodeNotifyConfig};
use codenotify_core::random::SeededRandom;
use codenotify_core::runner::{self, FeedSchedule, RunSummary};
use codenotify_core::seed::seed_contests;
use codenotify_core::settings::{self, FileKeyValueStore};
use codenotify_core::simulator::UpdateSimulator;
use codenotify_core::store::ContestStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::console::{ConsoleRenderer, TracingNotifier};
use crate::error::EngineError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid, settings storage fails, or
/// the feed stops with an error.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("codenotify-engine starting");
    if !from_file {
        info!("Config file not found, using defaults");
    }
    info!(
        status_sweep_secs = config.simulator.status_sweep_secs,
        participant_growth_secs = config.simulator.participant_growth_secs,
        contest_injection_secs = config.simulator.contest_injection_secs,
        injection_probability = config.simulator.injection_probability,
        seed = ?config.simulator.seed,
        "Configuration loaded"
    );

    let summary = run(&config).await?;

    // 7. Log results.
    runner::log_run_end(&summary);
    info!("codenotify-engine shutdown complete");

    Ok(())
}

async fn run(config: &CodeNotifyConfig) -> Result<RunSummary, EngineError> {
    // 3. Build the store.
    let mut store = ContestStore::with_contests(seed_contests(), Box::new(ConsoleRenderer))?;
    store.refresh();
    info!(contests = store.len(), "Seed contests loaded");

    let mut notifier = TracingNotifier;
    let api = MockApi::from_config(&config.api);

    // 4. Restore and submit preferences.
    let mut kv = FileKeyValueStore::new(&config.settings.path);
    match settings::load_settings(&kv)? {
        Some(saved) => info!(
            path = %kv.path().display(),
            reminder_time = %saved.reminder_time,
            any_channel = saved.any_channel_enabled(),
            "Saved notification settings restored"
        ),
        None => info!(path = %kv.path().display(), "No saved notification settings"),
    }
    if let Some(preferences) = &config.notifications {
        let outcome =
            settings::save_notification_settings(&api, &mut kv, preferences, &mut notifier)
                .await?;
        info!(?outcome, "Configured notification settings saved");
    }

    // 5. Initial fetch.
    let fetched = api.fetch_contests(&store).await;
    info!(contests = fetched.len(), "Initial contest fetch complete");

    // 6. Run the feed.
    let mut feed = UpdateSimulator::new(
        Box::new(SeededRandom::from_optional_seed(config.simulator.seed)),
        &config.simulator,
    );
    let schedule = FeedSchedule::from_config(&config.simulator);
    let summary = runner::run_feed(
        &mut store,
        &mut feed,
        &mut notifier,
        &schedule,
        shutdown_signal(config.simulator.max_runtime()),
    )
    .await?;

    Ok(summary)
}

/// Load configuration from `codenotify-config.yaml` in the working directory.
///
/// The flag is `false` when the file is absent and defaults are used.
fn load_config() -> Result<(CodeNotifyConfig, bool), EngineError> {
    let config_path = Path::new(CONFIG_FILE);
    if config_path.exists() {
        Ok((CodeNotifyConfig::from_file(config_path)?, true))
    } else {
        // parse rather than Default so the env override still applies
        Ok((CodeNotifyConfig::parse("{}")?, false))
    }
}

/// Resolves on Ctrl-C or once `max_runtime` elapses, whichever is first.
async fn shutdown_signal(max_runtime: Option<Duration>) {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    let deadline = async {
        match max_runtime {
            Some(limit) => tokio::time::sleep(limit).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        () = interrupt => info!("Interrupt received"),
        () = deadline => info!("Maximum runtime reached"),
    }
}
