//! Shared Cache Module
//!
//! Process-wide handle to a `TtlCache`, shared by all request handlers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{RwLock, RwLockWriteGuard};

use crate::cache::{CacheStats, SweepPolicy, TtlCache};

/// Configuration and counters of a cache, read together under one lock.
#[derive(Debug, Clone)]
pub struct CacheSnapshot {
    pub ttl: Duration,
    pub policy: SweepPolicy,
    pub stats: CacheStats,
}

// == Shared Cache ==
/// Cloneable, lock-protected cache handle.
///
/// Each method takes the lock for exactly one cache operation, so concurrent
/// handlers may interleave between calls but never observe a partial update.
/// Reads need the write lock because they evict stale entries and count stats.
#[derive(Debug)]
pub struct SharedCache<V> {
    inner: Arc<RwLock<TtlCache<V>>>,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone> SharedCache<V> {
    pub fn new(cache: TtlCache<V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.write().await.get(key)
    }

    pub async fn set(&self, key: impl Into<String>, value: V) {
        self.inner.write().await.set(key, value);
    }

    pub async fn remove(&self, key: &str) -> Option<V> {
        self.inner.write().await.remove(key)
    }

    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }

    /// Removes every expired entry, returning how many were dropped.
    pub async fn sweep(&self) -> usize {
        self.inner.write().await.sweep()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    /// Reads ttl, policy and stats without blocking other readers.
    pub async fn snapshot(&self) -> CacheSnapshot {
        let cache = self.inner.read().await;
        CacheSnapshot {
            ttl: cache.ttl(),
            policy: cache.policy(),
            stats: cache.stats(),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Holds the lock across several operations that must not interleave
    /// with other handlers.
    pub async fn lock(&self) -> RwLockWriteGuard<'_, TtlCache<V>> {
        self.inner.write().await
    }

    /// Write guard if nobody else holds the lock right now.
    pub fn try_lock(&self) -> Option<RwLockWriteGuard<'_, TtlCache<V>>> {
        self.inner.try_write().ok()
    }
}
