//! Cache Store Module
//!
//! Main cache engine: a HashMap of timestamped entries with a fixed TTL,
//! lazy expiry on read and an optional sweep on write.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{duration_ms, CacheEntry, CacheStats, Clock, SweepPolicy, SystemClock};

// == TTL Cache ==
/// Key-value cache whose entries are valid for a fixed time after insertion.
///
/// Every operation is infallible; a miss simply means the caller recomputes.
#[derive(Debug)]
pub struct TtlCache<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Lifetime of every entry in milliseconds
    ttl_ms: u64,
    /// Write-time sweep strategy
    policy: SweepPolicy,
    /// Performance statistics
    stats: CacheStats,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    // == Constructor ==
    /// Creates a lazily-expiring cache on the wall clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Creates a lazily-expiring cache reading time from `clock`.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            ttl_ms: duration_ms(ttl),
            policy: SweepPolicy::Lazy,
            stats: CacheStats::new(),
            clock,
        }
    }

    /// Replaces the sweep policy.
    pub fn with_policy(mut self, policy: SweepPolicy) -> Self {
        self.policy = policy;
        self
    }

    // == Get ==
    /// Returns the value for `key` if present and unexpired.
    ///
    /// A stale entry is removed and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now, self.ttl_ms),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_expiration();
            self.stats.set_total_entries(self.entries.len());
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Peek ==
    /// Borrows the live value for `key` without evicting or counting.
    pub fn peek(&self, key: &str) -> Option<&V> {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(now, self.ttl_ms))
            .map(|entry| &entry.value)
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous entry and its
    /// timestamp, then applies the sweep policy.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let entry = CacheEntry::new(value, self.clock.now_ms());
        self.entries.insert(key.into(), entry);

        if self.policy.should_sweep(self.entries.len()) {
            self.sweep();
        }

        self.stats.set_total_entries(self.entries.len());
    }

    // == Get Or Insert ==
    /// Returns the cached value, or computes, stores and returns a fresh one.
    pub fn get_or_insert_with<F>(&mut self, key: &str, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(key) {
            return value;
        }
        let value = compute();
        self.set(key, value.clone());
        value
    }

    // == Remove ==
    /// Drops one entry, returning its value if it was still live.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();
        let removed = self.entries.remove(key);
        self.stats.set_total_entries(self.entries.len());
        removed
            .filter(|entry| !entry.is_expired(now, self.ttl_ms))
            .map(|entry| entry.value)
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.record_clear();
        self.stats.set_total_entries(0);
    }

    // == Sweep ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&mut self) -> usize {
        let now = self.clock.now_ms();
        let ttl_ms = self.ttl_ms;
        let before = self.entries.len();

        self.entries.retain(|_, entry| !entry.is_expired(now, ttl_ms));

        let removed = before - self.entries.len();
        self.stats.record_sweep(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Number of stored entries, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    pub fn policy(&self) -> SweepPolicy {
        self.policy
    }

    /// Raw entry access, expired or not.
    pub fn entry(&self, key: &str) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }
}
