//! Configuration loading and typed config structures for CodeNotify.
//!
//! The configuration lives in `codenotify-config.yaml` in the working
//! directory. Every field has a default, so a missing file or a partial
//! file is fine. [`CodeNotifyConfig::validate`] rejects values the
//! simulator cannot run with.

use std::path::{Path, PathBuf};
use std::time::Duration;

use codenotify_types::NotificationSettings;
use serde::Deserialize;

/// Default configuration file name.
pub const CONFIG_FILE: &str = "codenotify-config.yaml";

/// Environment variable that overrides `settings.path`.
pub const SETTINGS_PATH_ENV: &str = "CODENOTIFY_SETTINGS_PATH";

/// Longest accepted timer period, in seconds (one week).
pub const MAX_PERIOD_SECS: u64 = 604_800;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value is out of range.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CodeNotifyConfig {
    /// Simulated feed timing and randomness.
    #[serde(default)]
    pub simulator: SimulatorConfig,

    /// Artificial delays of the local API stand-ins.
    #[serde(default)]
    pub api: ApiConfig,

    /// Where notification preferences are persisted.
    #[serde(default)]
    pub settings: SettingsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Preferences to submit at startup, if any.
    #[serde(default)]
    pub notifications: Option<NotificationSettings>,
}

impl CodeNotifyConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// `CODENOTIFY_SETTINGS_PATH` overrides `settings.path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.settings.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check every value the simulator depends on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulator.validate()
    }
}

/// Simulated feed configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulatorConfig {
    /// Seed for the random source; `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Seconds between status sweeps.
    #[serde(default = "default_status_sweep_secs")]
    pub status_sweep_secs: u64,

    /// Seconds between participant growth firings.
    #[serde(default = "default_participant_growth_secs")]
    pub participant_growth_secs: u64,

    /// Seconds between contest injection firings.
    #[serde(default = "default_contest_injection_secs")]
    pub contest_injection_secs: u64,

    /// Probability that an injection firing adds a contest.
    #[serde(default = "default_injection_probability")]
    pub injection_probability: f64,

    /// Smallest participant growth amount.
    #[serde(default = "default_growth_min")]
    pub growth_min: u64,

    /// Largest participant growth amount.
    #[serde(default = "default_growth_max")]
    pub growth_max: u64,

    /// Milliseconds before the one-shot connected notification.
    #[serde(default = "default_connect_delay_ms")]
    pub connect_delay_ms: u64,

    /// Milliseconds before the one-shot welcome notification.
    #[serde(default = "default_welcome_delay_ms")]
    pub welcome_delay_ms: u64,

    /// Seconds between redraws that only refresh countdowns.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,

    /// Stop after this many seconds (0 = run until interrupted).
    #[serde(default)]
    pub max_runtime_secs: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            status_sweep_secs: default_status_sweep_secs(),
            participant_growth_secs: default_participant_growth_secs(),
            contest_injection_secs: default_contest_injection_secs(),
            injection_probability: default_injection_probability(),
            growth_min: default_growth_min(),
            growth_max: default_growth_max(),
            connect_delay_ms: default_connect_delay_ms(),
            welcome_delay_ms: default_welcome_delay_ms(),
            refresh_secs: default_refresh_secs(),
            max_runtime_secs: 0,
        }
    }
}

impl SimulatorConfig {
    /// Check periods, probability, and growth bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("status_sweep_secs", self.status_sweep_secs),
            ("participant_growth_secs", self.participant_growth_secs),
            ("contest_injection_secs", self.contest_injection_secs),
            ("refresh_secs", self.refresh_secs),
        ];
        for (name, value) in periods {
            if !(1..=MAX_PERIOD_SECS).contains(&value) {
                return Err(invalid(format!(
                    "simulator.{name} must be within [1, {MAX_PERIOD_SECS}], got {value}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.injection_probability) {
            return Err(invalid(format!(
                "simulator.injection_probability must be within [0, 1], got {}",
                self.injection_probability
            )));
        }
        if self.growth_min == 0 {
            return Err(invalid("simulator.growth_min must be at least 1".to_owned()));
        }
        if self.growth_max < self.growth_min {
            return Err(invalid(format!(
                "simulator.growth_max ({}) is below growth_min ({})",
                self.growth_max, self.growth_min
            )));
        }
        Ok(())
    }

    /// Status sweep period.
    pub const fn status_sweep(&self) -> Duration {
        Duration::from_secs(self.status_sweep_secs)
    }

    /// Participant growth period.
    pub const fn participant_growth(&self) -> Duration {
        Duration::from_secs(self.participant_growth_secs)
    }

    /// Contest injection period.
    pub const fn contest_injection(&self) -> Duration {
        Duration::from_secs(self.contest_injection_secs)
    }

    /// Countdown refresh period.
    pub const fn refresh(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }

    /// Delay before the connected notification.
    pub const fn connect_delay(&self) -> Duration {
        Duration::from_millis(self.connect_delay_ms)
    }

    /// Delay before the welcome notification.
    pub const fn welcome_delay(&self) -> Duration {
        Duration::from_millis(self.welcome_delay_ms)
    }

    /// Runtime bound, if any.
    pub const fn max_runtime(&self) -> Option<Duration> {
        if self.max_runtime_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.max_runtime_secs))
        }
    }
}

/// Delays of the local API stand-ins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    /// Milliseconds a contest fetch takes.
    #[serde(default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: u64,

    /// Milliseconds a settings submission takes.
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            fetch_delay_ms: default_fetch_delay_ms(),
            submit_delay_ms: default_submit_delay_ms(),
        }
    }
}

/// Settings persistence location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SettingsConfig {
    /// File backing the key-value store.
    #[serde(default = "default_settings_path")]
    pub path: PathBuf,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            path: default_settings_path(),
        }
    }
}

impl SettingsConfig {
    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var(SETTINGS_PATH_ENV) {
            if !path.is_empty() {
                self.path = PathBuf::from(path);
            }
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is unset (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn invalid(reason: String) -> ConfigError {
    ConfigError::Invalid { reason }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_status_sweep_secs() -> u64 {
    30
}

const fn default_participant_growth_secs() -> u64 {
    45
}

const fn default_contest_injection_secs() -> u64 {
    90
}

const fn default_injection_probability() -> f64 {
    0.3
}

const fn default_growth_min() -> u64 {
    1
}

const fn default_growth_max() -> u64 {
    100
}

const fn default_connect_delay_ms() -> u64 {
    1_000
}

const fn default_welcome_delay_ms() -> u64 {
    2_000
}

const fn default_refresh_secs() -> u64 {
    60
}

const fn default_fetch_delay_ms() -> u64 {
    500
}

const fn default_submit_delay_ms() -> u64 {
    800
}

fn default_settings_path() -> PathBuf {
    PathBuf::from("codenotify-settings.json")
}

fn default_log_level() -> String {
    "info".to_owned()
}
