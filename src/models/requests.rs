//! Request DTOs for the cache service API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

/// Maximum accepted raw key length in bytes
pub const MAX_KEY_LENGTH: usize = 512;

/// Request body for `PUT /caches/:cache/entries`
#[derive(Debug, Clone, Deserialize)]
pub struct SetEntryRequest {
    /// The cache key
    pub key: String,
    /// The value to store; the AI cache only accepts strings
    pub value: Value,
}

impl SetEntryRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key)
    }
}

/// Request body for `POST /ai/answers/lookup`
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerLookupRequest {
    pub session_id: String,
    pub message: String,
}

impl AnswerLookupRequest {
    pub fn validate(&self) -> Option<String> {
        validate_session(&self.session_id)
    }
}

/// Request body for `PUT /ai/answers`
#[derive(Debug, Clone, Deserialize)]
pub struct StoreAnswerRequest {
    pub session_id: String,
    pub message: String,
    pub answer: String,
}

impl StoreAnswerRequest {
    pub fn validate(&self) -> Option<String> {
        validate_session(&self.session_id)
    }
}

fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}

fn validate_session(session_id: &str) -> Option<String> {
    if session_id.trim().is_empty() {
        return Some("Session id cannot be empty".to_string());
    }
    None
}
