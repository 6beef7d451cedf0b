//! AI answer cache.
//!
//! Memoizes answers across requests for a few minutes, keyed by session and
//! message. Expired answers are only dropped when a lookup finds them.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheStats, Clock, SharedCache, SweepPolicy, SystemClock, TtlCache};
use crate::keys::{ai_key, KeyPolicy};

/// Default lifetime of a cached answer.
pub const DEFAULT_AI_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone)]
pub struct AiCache {
    cache: SharedCache<String>,
    key_policy: KeyPolicy,
}

impl AiCache {
    pub fn new(ttl: Duration, key_policy: KeyPolicy) -> Self {
        Self::with_clock(ttl, key_policy, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, key_policy: KeyPolicy, clock: Arc<dyn Clock>) -> Self {
        let cache = TtlCache::with_clock(ttl, clock).with_policy(SweepPolicy::Lazy);
        Self {
            cache: SharedCache::new(cache),
            key_policy,
        }
    }

    pub fn key_policy(&self) -> KeyPolicy {
        self.key_policy
    }

    /// The key this cache stores the answer to `message` under.
    pub fn key_for(&self, session_id: &str, message: &str) -> String {
        ai_key(session_id, message, self.key_policy)
    }

    /// Cached answer for `message` in `session_id`, if still fresh.
    pub async fn get(&self, session_id: &str, message: &str) -> Option<String> {
        let key = self.key_for(session_id, message);
        let answer = self.cache.get(&key).await;
        debug!(session_id, hit = answer.is_some(), "ai cache lookup");
        answer
    }

    pub async fn set(&self, session_id: &str, message: &str, answer: impl Into<String>) {
        let key = self.key_for(session_id, message);
        self.cache.set(key, answer.into()).await;
    }

    /// Underlying cache, for raw key access and maintenance.
    pub fn shared(&self) -> &SharedCache<String> {
        &self.cache
    }

    pub async fn clear(&self) {
        self.cache.clear().await;
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}

impl Default for AiCache {
    fn default() -> Self {
        Self::new(DEFAULT_AI_TTL, KeyPolicy::default())
    }
}
