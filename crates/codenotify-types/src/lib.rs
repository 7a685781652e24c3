//! Shared type definitions for the CodeNotify contest tracker.
//!
//! This crate is the single source of truth for the records that flow
//! between the contest store, the update simulator, and the rendering and
//! notification collaborators.
//!
//! # Modules
//!
//! - [`ids`] -- Contest identifier wrapper
//! - [`enums`] -- Contest status and notification level
//! - [`structs`] -- Contest and notification records
//! - [`settings`] -- Persisted notification preferences

pub mod enums;
pub mod ids;
pub mod settings;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{ContestStatus, NotificationLevel};
pub use ids::ContestId;
pub use settings::NotificationSettings;
pub use structs::{Contest, Notification};
