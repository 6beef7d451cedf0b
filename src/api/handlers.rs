//! API Handlers
//!
//! HTTP request handlers for each cache service endpoint.

use std::fmt;
use std::str::FromStr;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::ai::AiCache;
use crate::auth::AuthCache;
use crate::cache::{duration_ms, SharedCache};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    AllStatsResponse, AnswerLookupRequest, AnswerResponse, EntryResponse, HealthResponse,
    MessageResponse, SetEntryRequest, StatsResponse, StoreAnswerRequest, SweepResponse,
};

/// Application state shared across all handlers.
///
/// Both caches are cheap to clone handles over lock-protected tables.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub ai: AiCache,
    pub auth: AuthCache,
}

impl AppState {
    pub fn new(ai: AiCache, auth: AuthCache) -> Self {
        Self { ai, auth }
    }

    /// Creates both caches from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            AiCache::new(config.ai_ttl, config.ai_key_policy),
            AuthCache::new(config.auth_ttl, config.auth_sweep_threshold),
        )
    }

    async fn stats_for(&self, cache: CacheName) -> StatsResponse {
        match cache {
            CacheName::Ai => stats_response(cache, self.ai.shared()).await,
            CacheName::Auth => stats_response(cache, self.auth.shared()).await,
        }
    }
}

async fn stats_response<V: Clone>(name: CacheName, cache: &SharedCache<V>) -> StatsResponse {
    let snapshot = cache.snapshot().await;
    StatsResponse::new(
        name.to_string(),
        duration_ms(snapshot.ttl),
        snapshot.policy,
        snapshot.stats,
    )
}

// == Cache Name ==
/// The caches addressable under `/caches/:cache`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheName {
    Ai,
    Auth,
}

impl FromStr for CacheName {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ai" => Ok(CacheName::Ai),
            "auth" => Ok(CacheName::Auth),
            other => Err(ApiError::UnknownCache(other.to_string())),
        }
    }
}

impl fmt::Display for CacheName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheName::Ai => write!(f, "ai"),
            CacheName::Auth => write!(f, "auth"),
        }
    }
}

/// Handler for PUT /caches/:cache/entries
pub async fn set_entry_handler(
    State(state): State<AppState>,
    Path(cache): Path<String>,
    Json(req): Json<SetEntryRequest>,
) -> Result<Json<MessageResponse>> {
    let cache: CacheName = cache.parse()?;
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    match cache {
        CacheName::Ai => {
            let Value::String(answer) = req.value else {
                return Err(ApiError::InvalidRequest(
                    "AI cache values must be strings".to_string(),
                ));
            };
            state.ai.shared().set(req.key.as_str(), answer).await;
        }
        CacheName::Auth => state.auth.set(req.key.as_str(), req.value).await,
    }

    debug!(%cache, key = %req.key, "entry set");
    Ok(Json(MessageResponse::set(req.key)))
}

/// Handler for GET /caches/:cache/entries/:key
pub async fn get_entry_handler(
    State(state): State<AppState>,
    Path((cache, key)): Path<(String, String)>,
) -> Result<Json<EntryResponse>> {
    let cache: CacheName = cache.parse()?;

    let value = match cache {
        CacheName::Ai => state.ai.shared().get(&key).await.map(Value::String),
        CacheName::Auth => state.auth.get(&key).await,
    };

    match value {
        Some(value) => Ok(Json(EntryResponse::new(cache.to_string(), key, value))),
        None => Err(ApiError::NotFound(key)),
    }
}

/// Handler for DELETE /caches/:cache/entries/:key
pub async fn remove_entry_handler(
    State(state): State<AppState>,
    Path((cache, key)): Path<(String, String)>,
) -> Result<Json<MessageResponse>> {
    let cache: CacheName = cache.parse()?;

    let removed = match cache {
        CacheName::Ai => state.ai.shared().remove(&key).await.is_some(),
        CacheName::Auth => state.auth.shared().remove(&key).await.is_some(),
    };

    if removed {
        Ok(Json(MessageResponse::removed(key)))
    } else {
        Err(ApiError::NotFound(key))
    }
}

/// Handler for DELETE /caches/:cache
pub async fn clear_handler(
    State(state): State<AppState>,
    Path(cache): Path<String>,
) -> Result<Json<MessageResponse>> {
    let cache: CacheName = cache.parse()?;

    match cache {
        CacheName::Ai => state.ai.clear().await,
        CacheName::Auth => state.auth.clear().await,
    }

    info!(%cache, "cache cleared");
    Ok(Json(MessageResponse::cleared(&cache.to_string())))
}

/// Handler for POST /caches/:cache/sweep
pub async fn sweep_handler(
    State(state): State<AppState>,
    Path(cache): Path<String>,
) -> Result<Json<SweepResponse>> {
    let cache: CacheName = cache.parse()?;

    let removed = match cache {
        CacheName::Ai => state.ai.shared().sweep().await,
        CacheName::Auth => state.auth.shared().sweep().await,
    };

    info!(%cache, removed, "manual sweep");
    Ok(Json(SweepResponse {
        cache: cache.to_string(),
        removed,
    }))
}

/// Handler for GET /caches/:cache/stats
pub async fn cache_stats_handler(
    State(state): State<AppState>,
    Path(cache): Path<String>,
) -> Result<Json<StatsResponse>> {
    let cache: CacheName = cache.parse()?;
    Ok(Json(state.stats_for(cache).await))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<AllStatsResponse> {
    Json(AllStatsResponse {
        ai: state.stats_for(CacheName::Ai).await,
        auth: state.stats_for(CacheName::Auth).await,
    })
}

/// Handler for POST /ai/answers/lookup
pub async fn lookup_answer_handler(
    State(state): State<AppState>,
    Json(req): Json<AnswerLookupRequest>,
) -> Result<Json<AnswerResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let key = state.ai.key_for(&req.session_id, &req.message);
    match state.ai.get(&req.session_id, &req.message).await {
        Some(answer) => Ok(Json(AnswerResponse {
            session_id: req.session_id,
            key,
            answer,
        })),
        None => Err(ApiError::NotFound(key)),
    }
}

/// Handler for PUT /ai/answers
pub async fn store_answer_handler(
    State(state): State<AppState>,
    Json(req): Json<StoreAnswerRequest>,
) -> Result<Json<AnswerResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    state
        .ai
        .set(&req.session_id, &req.message, req.answer.as_str())
        .await;

    Ok(Json(AnswerResponse {
        key: state.ai.key_for(&req.session_id, &req.message),
        session_id: req.session_id,
        answer: req.answer,
    }))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set_request(key: &str, value: Value) -> Json<SetEntryRequest> {
        Json(SetEntryRequest {
            key: key.to_string(),
            value,
        })
    }

    #[test]
    fn test_cache_name_parse() {
        assert_eq!("ai".parse::<CacheName>().unwrap(), CacheName::Ai);
        assert_eq!("auth".parse::<CacheName>().unwrap(), CacheName::Auth);
        assert!(matches!(
            "blog".parse::<CacheName>(),
            Err(ApiError::UnknownCache(_))
        ));
    }

    #[tokio::test]
    async fn test_set_and_get_auth_entry() {
        let state = AppState::default();

        let result = set_entry_handler(
            State(state.clone()),
            Path("auth".to_string()),
            set_request("session:tok", json!({"user_id": "u1"})),
        )
        .await;
        assert!(result.is_ok());

        let response = get_entry_handler(
            State(state),
            Path(("auth".to_string(), "session:tok".to_string())),
        )
        .await
        .unwrap();
        assert_eq!(response.value, json!({"user_id": "u1"}));
    }

    #[tokio::test]
    async fn test_ai_cache_rejects_non_string_values() {
        let state = AppState::default();

        let result = set_entry_handler(
            State(state),
            Path("ai".to_string()),
            set_request("s1:hello", json!(42)),
        )
        .await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = AppState::default();

        let result = get_entry_handler(
            State(state),
            Path(("ai".to_string(), "nonexistent".to_string())),
        )
        .await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_clear_handler() {
        let state = AppState::default();
        state.auth.set("k", json!(1)).await;

        clear_handler(State(state.clone()), Path("auth".to_string()))
            .await
            .unwrap();

        assert!(state.auth.get("k").await.is_none());
    }

    #[tokio::test]
    async fn test_store_then_lookup_answer() {
        let state = AppState::default();

        let stored = store_answer_handler(
            State(state.clone()),
            Json(StoreAnswerRequest {
                session_id: "s1".to_string(),
                message: "What changed?".to_string(),
                answer: "Nothing yet.".to_string(),
            }),
        )
        .await
        .unwrap();

        let found = lookup_answer_handler(
            State(state),
            Json(AnswerLookupRequest {
                session_id: "s1".to_string(),
                message: "What  changed?".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(found.answer, "Nothing yet.");
        assert_eq!(found.key, stored.key);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = AppState::default();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.ai.stats.hits, 0);
        assert_eq!(response.auth.ttl_ms, 1_000);
        assert_eq!(response.ai.ttl_ms, 300_000);
    }

    #[tokio::test]
    async fn test_stats_report_saturated_ttl() {
        let state = AppState::new(
            AiCache::default(),
            AuthCache::new(std::time::Duration::MAX, 100),
        );

        let response = cache_stats_handler(State(state), Path("auth".to_string()))
            .await
            .unwrap();
        assert_eq!(response.ttl_ms, u64::MAX);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
