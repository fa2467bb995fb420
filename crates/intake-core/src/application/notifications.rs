//! Transient notifications

use serde::Serialize;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// A message shown to the visitor for a limited time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub raised_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= ttl
    }
}

/// Queue of notifications that auto-dismiss after `ttl`
#[derive(Debug, Clone)]
pub struct Notifications {
    ttl: Duration,
    queue: VecDeque<Notification>,
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            queue: VecDeque::new(),
        }
    }

    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(?kind, message = %message, "Notification raised");
        self.queue.push_back(Notification {
            kind,
            message,
            raised_at: Instant::now(),
        });
    }

    /// Drop expired entries and return what is still visible, oldest first
    pub fn active(&mut self) -> Vec<Notification> {
        let now = Instant::now();
        let ttl = self.ttl;
        self.queue.retain(|n| !n.is_expired(ttl, now));
        self.queue.iter().cloned().collect()
    }

    /// Most recent visible notification
    pub fn latest(&mut self) -> Option<Notification> {
        self.active().pop()
    }

    pub fn dismiss_all(&mut self) {
        self.queue.clear();
    }
}
