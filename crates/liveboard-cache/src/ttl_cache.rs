//! Generic TTL cache

use parking_lot::RwLock;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug)]
struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// Hit/miss counters and current size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Invalidation epoch observed before a read-through recompute started
///
/// Handed back to [`TtlCache::set_if_current`], which refuses the value if the key was
/// invalidated in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillToken(u64);

#[derive(Debug)]
struct Slots<K, V> {
    entries: HashMap<K, Entry<V>>,
    // epoch of the last invalidation per key; one stamp per invalidated key
    invalidated_at: HashMap<K, u64>,
    epoch: u64,
}

/// Key/value cache whose entries expire a fixed time after they were set
///
/// Reads take the shared lock; `set`, `invalidate`, and `purge_expired` take the exclusive
/// lock. Expired entries stay in memory until purged but are never returned.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    slots: RwLock<Slots<K, V>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            slots: RwLock::new(Slots {
                entries: HashMap::new(),
                invalidated_at: HashMap::new(),
                epoch: 0,
            }),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Value for `key` if present and not yet expired
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let value = self
            .slots
            .read()
            .entries
            .get(key)
            .filter(|entry| now < entry.expires_at)
            .map(|entry| entry.value.clone());

        let counter = if value.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        value
    }

    /// Store `value`, replacing any previous entry, to expire one TTL from now
    pub fn set(&self, key: K, value: V) {
        let expires_at = Instant::now() + self.ttl;
        self.slots
            .write()
            .entries
            .insert(key, Entry { value, expires_at });
    }

    /// Start a read-through fill; take the token before reading the source of truth
    pub fn begin_fill(&self) -> FillToken {
        FillToken(self.slots.read().epoch)
    }

    /// Store `value` unless `key` was invalidated after `token` was taken
    ///
    /// Returns whether the value was stored.
    pub fn set_if_current(&self, key: K, value: V, token: FillToken) -> bool {
        let expires_at = Instant::now() + self.ttl;
        let mut slots = self.slots.write();
        if slots
            .invalidated_at
            .get(&key)
            .is_some_and(|&stamp| stamp > token.0)
        {
            return false;
        }
        slots.entries.insert(key, Entry { value, expires_at });
        true
    }

    /// Drop the entry for `key`; returns whether one existed
    ///
    /// Fills begun before this call will not store their value.
    pub fn invalidate(&self, key: &K) -> bool {
        let mut slots = self.slots.write();
        slots.epoch += 1;
        let epoch = slots.epoch;
        slots.invalidated_at.insert(key.clone(), epoch);
        slots.entries.remove(key).is_some()
    }

    /// Remove every expired entry; returns how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut slots = self.slots.write();
        let before = slots.entries.len();
        slots.entries.retain(|_, entry| now < entry.expires_at);
        before - slots.entries.len()
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.slots.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}
