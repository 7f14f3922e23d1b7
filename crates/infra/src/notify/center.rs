//! In-memory notification queue
//!
//! A front end polls [`NotificationCenter::list`] (or drains it) and calls
//! [`NotificationCenter::dismiss`] once a toast is closed or times out.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use backoffice_core::Notifier;
use backoffice_domain::constants::DEFAULT_NOTIFICATION_TIMEOUT_MS;
use backoffice_domain::{Notification, NotificationLevel};
use parking_lot::Mutex;
use tracing::debug;

/// Queue of pending notifications; clones share the same queue.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    next_id: AtomicU64,
    timeout_ms: Option<u64>,
    pending: Mutex<Vec<Notification>>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::with_timeout(Some(DEFAULT_NOTIFICATION_TIMEOUT_MS))
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` keeps notifications visible until dismissed.
    pub fn with_timeout(timeout_ms: Option<u64>) -> Self {
        Self {
            inner: Arc::new(Inner {
                next_id: AtomicU64::new(1),
                timeout_ms,
                pending: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Queue a notification and return its id. Blank messages are dropped.
    pub fn push(&self, level: NotificationLevel, message: &str) -> Option<u64> {
        if message.trim().is_empty() {
            return None;
        }

        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.pending.lock().push(Notification {
            id,
            message: message.to_string(),
            level,
            timeout_ms: self.inner.timeout_ms,
        });
        debug!(id, level = %level, "notification queued");
        Some(id)
    }

    /// Snapshot of pending notifications, oldest first.
    pub fn list(&self) -> Vec<Notification> {
        self.inner.pending.lock().clone()
    }

    /// Remove one notification; returns whether it was pending.
    pub fn dismiss(&self, id: u64) -> bool {
        let mut pending = self.inner.pending.lock();
        let before = pending.len();
        pending.retain(|n| n.id != id);
        pending.len() != before
    }

    /// Take every pending notification.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.inner.pending.lock())
    }

    /// Drop every pending notification.
    pub fn clear(&self) {
        self.inner.pending.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, level: NotificationLevel, message: &str) {
        self.push(level, message);
    }
}
