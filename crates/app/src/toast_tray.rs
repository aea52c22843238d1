//! In-process toast tray: the default [`Notifier`] implementation.
//!
//! Toasts live for a fixed TTL and can be dismissed early. Every change is
//! broadcast as a [`ToastEvent`] so streaming adapters can mirror the tray.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::broadcast;

use homedash_domain::notification::Notification;
use homedash_domain::time::{self, Timestamp};

use crate::ports::Notifier;

/// A notification currently on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: u64,
    #[serde(flatten)]
    pub notification: Notification,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

/// A change in the tray.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ToastEvent {
    Shown(Toast),
    Dismissed { id: u64 },
}

/// Auto-expiring, dismissible notification tray.
pub struct ToastTray {
    ttl: Duration,
    next_id: AtomicU64,
    toasts: Arc<Mutex<Vec<Toast>>>,
    sender: broadcast::Sender<ToastEvent>,
}

impl ToastTray {
    /// Create a tray whose toasts expire after `ttl`, buffering up to
    /// `capacity` events per subscriber.
    #[must_use]
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            ttl,
            next_id: AtomicU64::new(1),
            toasts: Arc::new(Mutex::new(Vec::new())),
            sender,
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Toasts that have not expired or been dismissed, oldest first.
    #[must_use]
    pub fn active(&self) -> Vec<Toast> {
        let now = time::now();
        let mut toasts = lock(&self.toasts);
        toasts.retain(|toast| toast.expires_at > now);
        toasts.clone()
    }

    /// Remove a toast before it expires. Returns `false` if it was already
    /// gone.
    pub fn dismiss(&self, id: u64) -> bool {
        remove(&self.toasts, &self.sender, id)
    }

    /// Subscribe to tray changes made *after* this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ToastEvent> {
        self.sender.subscribe()
    }

    fn schedule_expiry(&self, id: u64) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            // No runtime: expiry falls back to the lazy prune in `active`.
            return;
        };
        let ttl = self.ttl;
        let toasts = Arc::clone(&self.toasts);
        let sender = self.sender.clone();
        handle.spawn(async move {
            tokio::time::sleep(ttl).await;
            remove(&toasts, &sender, id);
        });
    }
}

impl Notifier for ToastTray {
    fn notify(&self, notification: Notification) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let created_at = time::now();
        let toast = Toast {
            id,
            notification,
            created_at,
            expires_at: time::after(created_at, self.ttl),
        };
        tracing::debug!(
            toast_id = id,
            kind = %toast.notification.kind,
            title = %toast.notification.title,
            "toast shown"
        );
        lock(&self.toasts).push(toast.clone());
        let _ = self.sender.send(ToastEvent::Shown(toast));
        self.schedule_expiry(id);
    }
}

fn lock(toasts: &Mutex<Vec<Toast>>) -> MutexGuard<'_, Vec<Toast>> {
    toasts.lock().unwrap_or_else(PoisonError::into_inner)
}

fn remove(toasts: &Mutex<Vec<Toast>>, sender: &broadcast::Sender<ToastEvent>, id: u64) -> bool {
    let removed = {
        let mut toasts = lock(toasts);
        let before = toasts.len();
        toasts.retain(|toast| toast.id != id);
        toasts.len() != before
    };
    if removed {
        let _ = sender.send(ToastEvent::Dismissed { id });
    }
    removed
}
