//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::ai::DEFAULT_AI_TTL;
use crate::auth::{DEFAULT_AUTH_TTL, DEFAULT_SWEEP_THRESHOLD};
use crate::cache::duration_ms;
use crate::keys::KeyPolicy;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Lifetime of a cached AI answer
    pub ai_ttl: Duration,
    /// How AI answer keys are derived from the message
    pub ai_key_policy: KeyPolicy,
    /// Lifetime of a cached auth lookup
    pub auth_ttl: Duration,
    /// Auth table size above which writes sweep expired lookups
    pub auth_sweep_threshold: usize,
    /// Background sweep interval in seconds, 0 disables the task
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `AI_CACHE_TTL_MS` - AI answer TTL in milliseconds (default: 300000)
    /// - `AI_KEY_POLICY` - `digest`, `prefix` or `prefix:<chars>` (default: digest)
    /// - `AUTH_CACHE_TTL_MS` - auth lookup TTL in milliseconds (default: 1000)
    /// - `AUTH_SWEEP_THRESHOLD` - sweep trigger size (default: 100)
    /// - `SWEEP_INTERVAL` - background sweep seconds, 0 = off (default: 0)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            ai_ttl: Duration::from_millis(env_or("AI_CACHE_TTL_MS", duration_ms(defaults.ai_ttl))),
            ai_key_policy: env_or("AI_KEY_POLICY", defaults.ai_key_policy),
            auth_ttl: Duration::from_millis(env_or(
                "AUTH_CACHE_TTL_MS",
                duration_ms(defaults.auth_ttl),
            )),
            auth_sweep_threshold: env_or("AUTH_SWEEP_THRESHOLD", defaults.auth_sweep_threshold),
            sweep_interval: env_or("SWEEP_INTERVAL", defaults.sweep_interval),
        }
    }
}

/// Reads and parses `name`, falling back to `default` when unset or invalid.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using default", name, raw);
            default
        }),
        Err(_) => default,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            ai_ttl: DEFAULT_AI_TTL,
            ai_key_policy: KeyPolicy::Digest,
            auth_ttl: DEFAULT_AUTH_TTL,
            auth_sweep_threshold: DEFAULT_SWEEP_THRESHOLD,
            sweep_interval: 0,
        }
    }
}
