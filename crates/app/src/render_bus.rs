//! In-process render bus backed by a tokio broadcast channel.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::broadcast;

use homedash_domain::dashboard::DashboardView;

use crate::ports::Renderer;

/// One published projection.
#[derive(Debug, Clone, Serialize)]
pub struct RenderFrame {
    /// Monotonic counter, starting at 1 for the first frame.
    pub revision: u64,
    pub view: DashboardView,
}

/// [`Renderer`] that fans every projection out to subscribers.
///
/// Rendering succeeds even when there are no active subscribers
/// (the frame is simply dropped).
pub struct RenderBus {
    revision: AtomicU64,
    sender: broadcast::Sender<RenderFrame>,
}

impl RenderBus {
    /// Create a new render bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            revision: AtomicU64::new(0),
            sender,
        }
    }

    /// Subscribe to frames rendered *after* this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RenderFrame> {
        self.sender.subscribe()
    }

    /// Number of frames rendered so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Relaxed)
    }
}

impl Renderer for RenderBus {
    fn render(&self, view: &DashboardView) {
        let revision = self.revision.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::trace!(revision, tab = %view.tab, room = %view.room, "render");
        let _ = self.sender.send(RenderFrame {
            revision,
            view: view.clone(),
        });
    }
}
