//! Cache key construction.
//!
//! Keys are opaque to the caches; collision resistance is entirely up to the
//! builders here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Message characters kept by the prefix policy unless configured otherwise.
pub const DEFAULT_PREFIX_CHARS: usize = 100;

/// How the message part of an AI cache key is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum KeyPolicy {
    /// SHA-256 of the whole normalized message.
    #[default]
    Digest,
    /// First `chars` characters of the normalized message. Two messages that
    /// share that prefix in one session map to the same key.
    Prefix { chars: usize },
}

impl fmt::Display for KeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPolicy::Digest => write!(f, "digest"),
            KeyPolicy::Prefix { chars } => write!(f, "prefix({})", chars),
        }
    }
}

impl FromStr for KeyPolicy {
    type Err = String;

    /// Parses `digest`, `prefix` or `prefix:<chars>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.split_once(':') {
            None if s == "digest" => Ok(KeyPolicy::Digest),
            None if s == "prefix" => Ok(KeyPolicy::Prefix {
                chars: DEFAULT_PREFIX_CHARS,
            }),
            Some(("prefix", chars)) => chars
                .parse()
                .map(|chars| KeyPolicy::Prefix { chars })
                .map_err(|_| format!("invalid prefix length: {}", chars)),
            _ => Err(format!("unknown key policy: {}", s)),
        }
    }
}

/// Trims and collapses every whitespace run to a single space.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Builds the AI answer key `"{session_id}:{message part}"`.
pub fn ai_key(session_id: &str, message: &str, policy: KeyPolicy) -> String {
    let normalized = normalize_whitespace(message);
    let part = match policy {
        KeyPolicy::Digest => {
            let mut hasher = Sha256::new();
            hasher.update(normalized.as_bytes());
            format!("{:x}", hasher.finalize())
        }
        KeyPolicy::Prefix { chars } => normalized.chars().take(chars).collect(),
    };
    format!("{}:{}", session_id, part)
}

/// Builds an auth lookup signature, e.g. `auth_key("member", &[user, team])`.
pub fn auth_key(kind: &str, parts: &[&str]) -> String {
    let mut key = String::from(kind);
    for part in parts {
        key.push(':');
        key.push_str(part);
    }
    key
}
