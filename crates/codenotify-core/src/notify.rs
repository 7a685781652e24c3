//! Notification collaborator seam.

use codenotify_types::Notification;

/// Receives user-facing notifications.
///
/// The core calls [`notify`](Notifier::notify) exactly once per observable
/// event.
pub trait Notifier: Send {
    /// Deliver one notification.
    fn notify(&mut self, notification: &Notification);
}

/// A notifier that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpNotifier;

impl Notifier for NoOpNotifier {
    fn notify(&mut self, _notification: &Notification) {}
}

/// A notifier that keeps every notification it receives, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    received: Vec<Notification>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    pub const fn new() -> Self {
        Self {
            received: Vec::new(),
        }
    }

    /// Notifications received so far.
    pub fn received(&self) -> &[Notification] {
        &self.received
    }

    /// Messages received so far.
    pub fn messages(&self) -> Vec<&str> {
        self.received.iter().map(|n| n.message.as_str()).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: &Notification) {
        self.received.push(notification.clone());
    }
}
