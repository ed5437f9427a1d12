use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cache::clock::Clock;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    /// `None` when `put` was given a ttl too large to represent.
    expires_at: Option<Instant>,
}

/// Result of a cache lookup. A stale value is still handed back so callers
/// can decide what to do with it, but `fresh` is false.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup<V> {
    pub value: V,
    pub fresh: bool,
}

/// Map from key to value with a per-entry expiry.
///
/// An entry is fresh while `now < expires_at`; at exactly `expires_at` it is
/// already stale.
pub struct TtlCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            clock,
        }
    }

    pub fn get(&self, key: &K) -> Option<Lookup<V>> {
        let now = self.clock.now();
        self.entries.get(key).map(|entry| Lookup {
            value: entry.value.clone(),
            fresh: Self::is_fresh(entry, now),
        })
    }

    /// Like `get`, but a stale entry counts as absent.
    pub fn get_fresh(&self, key: &K) -> Option<V> {
        self.get(key)
            .and_then(|lookup| lookup.fresh.then_some(lookup.value))
    }

    /// Stores `value`, replacing whatever was there (fresh or not).
    pub fn put(&mut self, key: K, value: V, ttl: Duration) {
        let expires_at = self.clock.now().checked_add(ttl);
        self.entries.insert(key, CacheEntry { value, expires_at });
    }

    /// Drops every stale entry and returns how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| Self::is_fresh(entry, now));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn is_fresh(entry: &CacheEntry<V>, now: Instant) -> bool {
        entry.expires_at.is_none_or(|expires_at| now < expires_at)
    }
}
