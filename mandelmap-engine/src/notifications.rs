use std::time::{Duration, Instant};

/// A transient on-screen message.
#[derive(Debug, Clone)]
pub struct Notification {
    pub text: String,
    pub expires_at: Instant,
}

/// Time-bounded message log: appended newest-last, displayed newest-first,
/// pruned when expired.
///
/// All operations take an explicit `now` so the expiry behavior is
/// deterministic under test. Pruning is a separate `retain` pass rather
/// than removal during display traversal.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    entries: Vec<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, now: Instant, ttl: Duration) {
        self.entries.push(Notification {
            text: text.into(),
            expires_at: now + ttl,
        });
    }

    /// Drop every entry whose display window has passed.
    pub fn prune(&mut self, now: Instant) {
        self.entries.retain(|n| n.expires_at > now);
    }

    /// Texts still on screen, newest first.
    pub fn visible(&self, now: Instant) -> Vec<&str> {
        self.entries
            .iter()
            .rev()
            .filter(|n| n.expires_at > now)
            .map(|n| n.text.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
