//! Trailing-edge debouncer with one timer slot per control.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Serialises the fired tasks of one key.
#[derive(Default)]
struct Lane {
    turn: tokio::sync::Mutex<()>,
    latest: AtomicU64,
}

#[derive(Default)]
struct Slot {
    timer: Option<JoinHandle<()>>,
    lane: Arc<Lane>,
}

/// Coalesces bursts of work per key into a single trailing run.
///
/// Scheduling on a key cancels that key's pending timer and arms a new one,
/// so only the most recently scheduled task runs once the key has been idle
/// for `window`. A task whose timer already fired is detached and is never
/// cancelled by later scheduling, but fired tasks of one key run one at a
/// time: a task waits for the previous one to finish, and is skipped if a
/// newer task was scheduled while it waited.
pub struct Debouncer<K> {
    window: Duration,
    slots: Mutex<HashMap<K, Slot>>,
}

impl<K: Eq + Hash> Debouncer<K> {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            slots: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Arm (or re-arm) the timer for `key` with `task` as its payload.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, key: K, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let window = self.window;
        let mut slots = self.lock_slots();
        let slot = slots.entry(key).or_default();
        let generation = slot.lane.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let lane = Arc::clone(&slot.lane);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            tokio::spawn(async move {
                let _turn = lane.turn.lock().await;
                if lane.latest.load(Ordering::SeqCst) == generation {
                    task.await;
                }
            });
        });
        if let Some(previous) = slot.timer.replace(timer) {
            previous.abort();
        }
    }

    /// Number of keys whose timer has not fired yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.lock_slots()
            .values()
            .filter_map(|slot| slot.timer.as_ref())
            .filter(|timer| !timer.is_finished())
            .count()
    }

    fn lock_slots(&self) -> MutexGuard<'_, HashMap<K, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K> Drop for Debouncer<K> {
    fn drop(&mut self) {
        let slots = self.slots.get_mut().unwrap_or_else(PoisonError::into_inner);
        for timer in slots.drain().filter_map(|(_, slot)| slot.timer) {
            timer.abort();
        }
    }
}
