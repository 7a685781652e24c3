//! Key-value persistence of notification preferences.
//!
//! Preferences are one JSON blob under [`SETTINGS_KEY`], in the same shape
//! a browser would keep in local storage. [`FileKeyValueStore`] keeps all
//! keys in a single JSON object file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use codenotify_types::{Notification, NotificationSettings};
use tracing::{info, warn};

use crate::api::SettingsApi;
use crate::notify::Notifier;

/// Fixed key the preferences blob is stored under.
pub const SETTINGS_KEY: &str = "notificationSettings";

/// Errors from settings persistence.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Reading or writing the backing file failed.
    #[error("settings I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A stored blob could not be encoded or decoded.
    #[error("settings JSON error: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// String-valued key-value storage.
pub trait KeyValueStore {
    /// Value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError>;
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: BTreeMap<String, String>,
}

impl MemoryKeyValueStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// [`KeyValueStore`] backed by one JSON object file.
///
/// A missing file reads as empty. Every write rewrites the whole file.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    path: PathBuf,
}

impl FileKeyValueStore {
    /// Use the file at `path`, which need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, SettingsError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_owned(), value.to_owned());
        let encoded = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.path, encoded)?;
        Ok(())
    }
}

/// Load saved preferences, if any.
///
/// # Errors
///
/// Returns [`SettingsError`] if the storage cannot be read or the stored
/// blob is not valid JSON.
pub fn load_settings(
    kv: &dyn KeyValueStore,
) -> Result<Option<NotificationSettings>, SettingsError> {
    kv.get(SETTINGS_KEY)?
        .map(|blob| serde_json::from_str(&blob).map_err(SettingsError::from))
        .transpose()
}

/// Persist preferences under [`SETTINGS_KEY`].
///
/// # Errors
///
/// Returns [`SettingsError`] if encoding or writing fails.
pub fn save_settings(
    kv: &mut dyn KeyValueStore,
    settings: &NotificationSettings,
) -> Result<(), SettingsError> {
    let blob = serde_json::to_string(settings)?;
    kv.set(SETTINGS_KEY, &blob)
}

/// How a settings save was completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The API accepted the submission.
    Submitted,
    /// The API failed and the preferences were written locally instead.
    SavedLocally,
}

/// Submit preferences through `api`, falling back to local persistence.
///
/// Notifies `"Settings saved successfully!"` on success, or writes the blob
/// to `kv` and notifies `"Settings saved locally!"` when the API fails.
///
/// # Errors
///
/// Returns [`SettingsError`] only if the local fallback itself fails.
pub async fn save_notification_settings<A: SettingsApi>(
    api: &A,
    kv: &mut dyn KeyValueStore,
    settings: &NotificationSettings,
    notifier: &mut dyn Notifier,
) -> Result<SaveOutcome, SettingsError> {
    match api.submit(settings).await {
        Ok(ack) => {
            info!(message = %ack.message, "notification settings submitted");
            notifier.notify(&Notification::success("Settings saved successfully!"));
            Ok(SaveOutcome::Submitted)
        }
        Err(e) => {
            warn!(error = %e, "settings submission failed, saving locally");
            save_settings(kv, settings)?;
            notifier.notify(&Notification::info("Settings saved locally!"));
            Ok(SaveOutcome::SavedLocally)
        }
    }
}
