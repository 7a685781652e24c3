//! Notification preferences persisted as a single opaque record.
//!
//! The record is stored as one JSON blob under a fixed key. There is no
//! schema versioning: unknown fields are ignored and missing fields fall
//! back to their defaults.

use serde::{Deserialize, Serialize};

/// User notification preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    /// Send reminders by email.
    pub email_notifications: bool,
    /// Destination email address.
    pub email: String,
    /// Send reminders over `WhatsApp`.
    pub whatsapp_notifications: bool,
    /// Destination `WhatsApp` number.
    pub whatsapp_number: String,
    /// Lead time before a contest starts, as entered by the user.
    pub reminder_time: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: false,
            email: String::new(),
            whatsapp_notifications: false,
            whatsapp_number: String::new(),
            reminder_time: String::from("15"),
        }
    }
}

impl NotificationSettings {
    /// Whether any delivery channel is switched on.
    pub const fn any_channel_enabled(&self) -> bool {
        self.email_notifications || self.whatsapp_notifications
    }
}
