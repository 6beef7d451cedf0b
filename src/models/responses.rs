//! Response DTOs for the cache service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::{CacheStats, SweepPolicy};

/// Response body for `GET /caches/:cache/entries/:key`
#[derive(Debug, Clone, Serialize)]
pub struct EntryResponse {
    pub cache: String,
    pub key: String,
    pub value: Value,
}

impl EntryResponse {
    pub fn new(cache: impl Into<String>, key: impl Into<String>, value: Value) -> Self {
        Self {
            cache: cache.into(),
            key: key.into(),
            value,
        }
    }
}

/// Response body for writes, removals and clears
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Success message
    pub message: String,
    /// The key affected, absent for whole-cache operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl MessageResponse {
    pub fn set(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key: Some(key),
        }
    }

    pub fn removed(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' removed successfully", key),
            key: Some(key),
        }
    }

    pub fn cleared(cache: &str) -> Self {
        Self {
            message: format!("Cache '{}' cleared", cache),
            key: None,
        }
    }
}

/// Response body for `POST /caches/:cache/sweep`
#[derive(Debug, Clone, Serialize)]
pub struct SweepResponse {
    pub cache: String,
    /// Number of expired entries removed
    pub removed: usize,
}

/// Response body for the AI answer endpoints
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub session_id: String,
    /// The cache key the answer lives under
    pub key: String,
    pub answer: String,
}

/// Statistics for one cache (`GET /caches/:cache/stats`)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub cache: String,
    pub ttl_ms: u64,
    pub policy: SweepPolicy,
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(cache: impl Into<String>, ttl_ms: u64, policy: SweepPolicy, stats: CacheStats) -> Self {
        Self {
            cache: cache.into(),
            ttl_ms,
            policy,
            hit_rate: stats.hit_rate(),
            stats,
        }
    }
}

/// Response body for `GET /stats`
#[derive(Debug, Clone, Serialize)]
pub struct AllStatsResponse {
    pub ai: StatsResponse,
    pub auth: StatsResponse,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_response_serialize() {
        let resp = EntryResponse::new("auth", "session:tok", json!({"user_id": "u1"}));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["cache"], "auth");
        assert_eq!(json["value"]["user_id"], "u1");
    }

    #[test]
    fn test_cleared_message_has_no_key() {
        let json = serde_json::to_value(MessageResponse::cleared("ai")).unwrap();
        assert!(json.get("key").is_none());
        assert!(json["message"].as_str().unwrap().contains("ai"));
    }

    #[test]
    fn test_stats_response_flattens_counters() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();

        let resp = StatsResponse::new("auth", 1_000, SweepPolicy::Threshold(100), stats);
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["hits"], 3);
        assert_eq!(json["misses"], 1);
        assert_eq!(json["policy"]["threshold"], 100);
        assert!((resp.hit_rate - 0.75).abs() < 0.001);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
