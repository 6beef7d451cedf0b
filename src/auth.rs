//! Per-request auth lookup cache.
//!
//! Auth checks inside one incoming request often repeat the same lookup
//! (session, membership, role). The cache keeps those results for a second at
//! most, and a request scope removes its own lookups when the request finishes.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::cache::{CacheStats, Clock, SharedCache, SweepPolicy, SystemClock, TtlCache};

/// Default lifetime of a cached lookup.
pub const DEFAULT_AUTH_TTL: Duration = Duration::from_secs(1);

/// Table size above which a write sweeps out expired lookups.
pub const DEFAULT_SWEEP_THRESHOLD: usize = 100;

#[derive(Debug, Clone)]
pub struct AuthCache {
    cache: SharedCache<Value>,
}

impl AuthCache {
    pub fn new(ttl: Duration, sweep_threshold: usize) -> Self {
        Self::with_clock(ttl, sweep_threshold, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, sweep_threshold: usize, clock: Arc<dyn Clock>) -> Self {
        let cache =
            TtlCache::with_clock(ttl, clock).with_policy(SweepPolicy::Threshold(sweep_threshold));
        Self {
            cache: SharedCache::new(cache),
        }
    }

    pub async fn get(&self, key: &str) -> Option<Value> {
        self.cache.get(key).await
    }

    pub async fn set(&self, key: impl Into<String>, value: Value) {
        self.cache.set(key, value).await;
    }

    /// Returns the cached lookup or runs `lookup` and caches its result.
    ///
    /// Failed lookups are not cached.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: &str, lookup: F) -> Result<Value, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>>,
    {
        if let Some(value) = self.cache.get(key).await {
            return Ok(value);
        }
        let value = lookup().await?;
        self.cache.set(key, value.clone()).await;
        Ok(value)
    }

    /// Opens a request scope. Lookups it caches are removed when the scope
    /// closes; other requests keep using the cache meanwhile.
    pub fn scope(&self) -> RequestScope {
        RequestScope {
            cache: self.clone(),
            keys: HashSet::new(),
        }
    }

    pub fn shared(&self) -> &SharedCache<Value> {
        &self.cache
    }

    pub async fn clear(&self) {
        self.cache.clear().await;
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}

impl Default for AuthCache {
    fn default() -> Self {
        Self::new(DEFAULT_AUTH_TTL, DEFAULT_SWEEP_THRESHOLD)
    }
}

// == Request Scope ==
/// The auth lookups cached on behalf of one request.
///
/// Every call takes the cache lock for a single operation only. Closing or
/// dropping the scope removes the keys it inserted and nothing else.
#[derive(Debug)]
pub struct RequestScope {
    cache: AuthCache,
    keys: HashSet<String>,
}

impl RequestScope {
    pub async fn get(&self, key: &str) -> Option<Value> {
        self.cache.get(key).await
    }

    pub async fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        self.keys.insert(key.clone());
        self.cache.set(key, value).await;
    }

    /// Same as [`AuthCache::get_or_try_insert_with`], but the stored result
    /// is dropped when the scope closes.
    pub async fn get_or_try_insert_with<F, Fut, E>(
        &mut self,
        key: &str,
        lookup: F,
    ) -> Result<Value, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>>,
    {
        if let Some(value) = self.cache.get(key).await {
            return Ok(value);
        }
        let value = lookup().await?;
        self.set(key, value.clone()).await;
        Ok(value)
    }

    /// Number of distinct keys this scope has written.
    pub fn tracked(&self) -> usize {
        self.keys.len()
    }

    /// Ends the scope, waiting for its lookups to be removed.
    pub async fn close(mut self) {
        let keys = std::mem::take(&mut self.keys);
        let mut cache = self.cache.cache.lock().await;
        let dropped = remove_keys(&mut cache, &keys);
        debug!(dropped, "auth request scope closed");
    }
}

fn remove_keys(cache: &mut TtlCache<Value>, keys: &HashSet<String>) -> usize {
    keys.iter().filter_map(|key| cache.remove(key)).count()
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        if self.keys.is_empty() {
            return;
        }
        let keys = std::mem::take(&mut self.keys);

        if let Some(mut cache) = self.cache.cache.try_lock() {
            let dropped = remove_keys(&mut cache, &keys);
            debug!(dropped, "auth request scope dropped");
            return;
        }

        match Handle::try_current() {
            Ok(handle) => {
                let shared = self.cache.cache.clone();
                handle.spawn(async move {
                    let mut cache = shared.lock().await;
                    let dropped = remove_keys(&mut cache, &keys);
                    debug!(dropped, "auth request scope dropped");
                });
            }
            Err(_) => warn!(
                keys = keys.len(),
                "auth request scope dropped outside a runtime; lookups left to expire"
            ),
        }
    }
}
