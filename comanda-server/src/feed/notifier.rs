//! Front-of-house notifier
//!
//! Carries the "ticket ready" chime (and cancellations) from the state
//! machine to POS clients. Separate from the change feed on purpose: views
//! reconcile rows from the feed, while notifications are fire-and-forget
//! UI cues with no snapshot to heal from.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// What happened
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    /// A ticket reached `Ready`: front-of-house should play the chime
    TicketReady,
    /// A ticket was cancelled while the kitchen may already be working on it
    TicketCancelled,
}

/// One front-of-house notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub restaurant_id: String,
    pub ticket_id: String,
    /// Table label / takeaway tag shown in the toast
    pub source: String,
}

/// Broadcast channel for front-of-house notifications
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish; no subscribers is not a fault
    pub fn notify(&self, notification: Notification) {
        let _ = self.tx.send(notification);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(256)
    }
}
