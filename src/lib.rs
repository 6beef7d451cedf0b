//! TTL Cache - bounded-lifetime memoization for a collaboration backend
//!
//! Provides a fixed-TTL cache with lazy and threshold-triggered expiry, the
//! AI answer and per-request auth caches built on it, and a small HTTP
//! service hosting both.

pub mod ai;
pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod keys;
pub mod models;
pub mod tasks;

pub use ai::AiCache;
pub use api::AppState;
pub use auth::{AuthCache, RequestScope};
pub use cache::{SweepPolicy, TtlCache};
pub use config::Config;
pub use tasks::spawn_sweep_task;
