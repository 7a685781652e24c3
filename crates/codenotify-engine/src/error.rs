//! Error types for the CodeNotify binary.

/// Top-level error for the binary.
///
/// Each variant wraps one subsystem so `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: codenotify_core::config::ConfigError,
    },

    /// The seed list was rejected by the store.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: codenotify_core::store::StoreError,
    },

    /// Reading or writing saved preferences failed.
    #[error("settings error: {source}")]
    Settings {
        /// The underlying settings error.
        #[from]
        source: codenotify_core::settings::SettingsError,
    },

    /// The feed loop stopped with an error.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: codenotify_core::runner::RunnerError,
    },
}
