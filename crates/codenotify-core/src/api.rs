//! Local stand-ins for the remote contest API.
//!
//! There is no network client. [`MockApi`] waits for a configurable
//! artificial delay and then succeeds, which is enough to exercise the
//! asynchronous call sites and the settings fallback path.

use std::future::Future;
use std::time::Duration;

use codenotify_types::{Contest, NotificationSettings};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ApiConfig;
use crate::store::ContestStore;

/// Errors an API call can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The remote side refused the request.
    #[error("request rejected: {reason}")]
    Rejected {
        /// Why the request was refused.
        reason: String,
    },
}

/// Acknowledgement returned for a settings submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAck {
    /// Whether the submission was accepted.
    pub success: bool,
    /// Human-readable status.
    pub message: String,
}

/// Remote endpoint that accepts notification preferences.
pub trait SettingsApi {
    /// Submit preferences.
    fn submit(
        &self,
        settings: &NotificationSettings,
    ) -> impl Future<Output = Result<SubmitAck, ApiError>> + Send;
}

/// Delayed, always-successful API stand-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockApi {
    fetch_delay: Duration,
    submit_delay: Duration,
}

impl MockApi {
    /// Create a stand-in with explicit delays.
    pub const fn new(fetch_delay: Duration, submit_delay: Duration) -> Self {
        Self {
            fetch_delay,
            submit_delay,
        }
    }

    /// Create a stand-in from configuration.
    pub const fn from_config(config: &ApiConfig) -> Self {
        Self::new(
            Duration::from_millis(config.fetch_delay_ms),
            Duration::from_millis(config.submit_delay_ms),
        )
    }

    /// Snapshot of the store's contests after the fetch delay.
    pub async fn fetch_contests(&self, store: &ContestStore) -> Vec<Contest> {
        tokio::time::sleep(self.fetch_delay).await;
        debug!(contests = store.len(), "mock API: fetching contests");
        store.contests().to_vec()
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::from_config(&ApiConfig::default())
    }
}

impl SettingsApi for MockApi {
    async fn submit(&self, settings: &NotificationSettings) -> Result<SubmitAck, ApiError> {
        tokio::time::sleep(self.submit_delay).await;
        debug!(
            email = settings.email_notifications,
            whatsapp = settings.whatsapp_notifications,
            reminder_time = %settings.reminder_time,
            "mock API: saving notification settings"
        );
        Ok(SubmitAck {
            success: true,
            message: String::from("Settings saved"),
        })
    }
}
