//! API Module
//!
//! HTTP handlers and routing for the cache service REST API.
//!
//! # Endpoints
//! - `/caches/:cache/...` - Raw entry access and maintenance for `ai` or `auth`
//! - `/ai/answers` - AI answers addressed by session and message
//! - `GET /stats` - Statistics for every cache
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
