//! Transient user-facing notifications ("toasts").
//!
//! [`Notifier`] fans out [`Notification`]s over a `tokio::sync::broadcast`
//! channel. A tracked operation publishes a `Loading` notification and later
//! a `Success` or `Error` one with the same id, so subscribers can replace
//! the pending toast in place.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Shared by all notifications of one tracked operation.
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// Wording for the three stages of a tracked operation.
#[derive(Debug, Clone, Copy)]
pub struct TrackMessages {
    pub loading: &'static str,
    pub success: &'static str,
    pub error: &'static str,
}

pub struct Notifier {
    sender: broadcast::Sender<Notification>,
    next_id: AtomicU64,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Notifier {
    /// When the buffer is full the oldest notifications are dropped and slow
    /// receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    pub fn publish(&self, notification: Notification) {
        // No receivers is fine: nobody is showing toasts.
        let _ = self.sender.send(notification);
    }

    /// Publish a `Loading` notification and return the id to resolve it with.
    pub fn begin(&self, message: impl Into<String>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.publish(Notification {
            id,
            kind: NotificationKind::Loading,
            message: message.into(),
        });
        id
    }

    pub fn resolve(&self, id: u64, kind: NotificationKind, message: impl Into<String>) {
        self.publish(Notification {
            id,
            kind,
            message: message.into(),
        });
    }

    /// Await `operation`, reporting its progress and outcome. The result is
    /// returned untouched; the error detail never reaches the notification.
    pub async fn track<T, E, F>(&self, messages: TrackMessages, operation: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        let id = self.begin(messages.loading);
        let result = operation.await;
        match &result {
            Ok(_) => self.resolve(id, NotificationKind::Success, messages.success),
            Err(_) => self.resolve(id, NotificationKind::Error, messages.error),
        }
        result
    }
}
