//! API Routes
//!
//! Configures the Axum router with all cache service endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats_handler, clear_handler, get_entry_handler, health_handler, lookup_answer_handler,
    remove_entry_handler, set_entry_handler, stats_handler, store_answer_handler, sweep_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /caches/:cache/entries` - Store a key-value pair
/// - `GET /caches/:cache/entries/:key` - Retrieve a live value
/// - `DELETE /caches/:cache/entries/:key` - Remove one entry
/// - `DELETE /caches/:cache` - Clear a cache
/// - `POST /caches/:cache/sweep` - Remove expired entries now
/// - `GET /caches/:cache/stats` - Statistics for one cache
/// - `PUT /ai/answers` - Store an AI answer by session and message
/// - `POST /ai/answers/lookup` - Look up an AI answer by session and message
/// - `GET /stats` - Statistics for every cache
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/caches/:cache", delete(clear_handler))
        .route("/caches/:cache/entries", put(set_entry_handler))
        .route(
            "/caches/:cache/entries/:key",
            get(get_entry_handler).delete(remove_entry_handler),
        )
        .route("/caches/:cache/sweep", post(sweep_handler))
        .route("/caches/:cache/stats", get(cache_stats_handler))
        .route("/ai/answers", put(store_answer_handler))
        .route("/ai/answers/lookup", post(lookup_answer_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        create_router(AppState::default())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_set_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/caches/ai/entries")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"key":"s1:hello","value":"hi"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_cache() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/caches/blog/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/caches/auth/entries/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
