//! Per-key in-flight bookkeeping for optimistic updates.
//!
//! Every optimistic write to a `(device, field)` pair takes a token. Only the
//! resolution carrying the newest token may commit or roll back; older
//! resolutions are stale. The ledger also tracks the last confirmed value
//! (the baseline), so a failure after overlapping writes restores what the
//! device is actually known to hold rather than an unconfirmed intermediate.

use std::collections::HashMap;
use std::hash::Hash;

/// Outcome of resolving one in-flight write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<V> {
    /// Newest write confirmed; keep the optimistic value.
    Commit,
    /// Newest write failed; restore this baseline.
    RollBack(V),
    /// A newer write has started since; leave the registry alone.
    Stale,
}

#[derive(Debug)]
struct Entry<V> {
    token: u64,
    baseline: V,
}

/// Tracks the newest token and confirmed baseline per key.
#[derive(Debug)]
pub struct InFlightLedger<K, V> {
    next_token: u64,
    entries: HashMap<K, Entry<V>>,
}

impl<K, V> Default for InFlightLedger<K, V> {
    fn default() -> Self {
        Self {
            next_token: 0,
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V: Clone> InFlightLedger<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new write on `key`.
    ///
    /// `previous` is the value the write replaced. It becomes the baseline
    /// only when nothing else is in flight on `key`.
    pub fn begin(&mut self, key: K, previous: V) -> u64 {
        self.next_token += 1;
        let token = self.next_token;
        self.entries
            .entry(key)
            .and_modify(|entry| entry.token = token)
            .or_insert(Entry {
                token,
                baseline: previous,
            });
        token
    }

    /// Resolve the write identified by `token`.
    ///
    /// `written` is the value that write applied; a stale success promotes it
    /// to the confirmed baseline.
    pub fn resolve(&mut self, key: &K, token: u64, confirmed: bool, written: V) -> Resolution<V> {
        let Some(entry) = self.entries.get_mut(key) else {
            return Resolution::Stale;
        };
        if entry.token != token {
            if confirmed {
                entry.baseline = written;
            }
            return Resolution::Stale;
        }
        let Some(entry) = self.entries.remove(key) else {
            return Resolution::Stale;
        };
        if confirmed {
            Resolution::Commit
        } else {
            Resolution::RollBack(entry.baseline)
        }
    }

    /// Whether a write on `key` is awaiting resolution.
    #[must_use]
    pub fn is_pending(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
