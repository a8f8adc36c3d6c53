//! Runtime settings loaded from the process environment
//!
//! Every knob is optional with a default. Missing credentials downgrade the
//! service to the in-memory store and mock replies; they never fail startup.

use serde::{Deserialize, Serialize};

/// Default Gemini model identifier.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
/// Default reply time budget in seconds.
pub const DEFAULT_MAX_REPLY_SECS: u64 = 30;
/// Default maximum retained turns per conversation.
pub const DEFAULT_HISTORY_SOFT_LIMIT: usize = 200;
/// Default HTTP listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Runtime settings for the debate service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// API key for the Gemini backend; unset means mock replies
    pub gemini_api_key: Option<String>,
    /// Gemini model identifier
    pub gemini_model: String,
    /// Redis connection URL; set means the key-value store is preferred
    pub redis_url: Option<String>,
    /// Optional TTL applied to each conversation key in Redis
    pub redis_ttl_secs: Option<u64>,
    /// Path to the SQLite database file, used when no Redis URL is set
    pub sqlite_path: Option<String>,
    /// Reply generation budget in seconds; a 2s safety margin is subtracted
    pub max_reply_secs: u64,
    /// Maximum retained turns per conversation
    pub history_soft_limit: usize,
    /// Listen address for the HTTP server
    pub bind_addr: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            redis_url: None,
            redis_ttl_secs: None,
            sqlite_path: None,
            max_reply_secs: DEFAULT_MAX_REPLY_SECS,
            history_soft_limit: DEFAULT_HISTORY_SOFT_LIMIT,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    ///
    /// `from_env` delegates here; tests inject a closure over a map instead
    /// of mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values behave like unset variables.
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Settings {
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            redis_url: get("REDIS_URL"),
            redis_ttl_secs: get("REDIS_TTL_SECS").and_then(|v| v.parse().ok()),
            sqlite_path: get("SQLITE_PATH"),
            max_reply_secs: get("MAX_REPLY_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_REPLY_SECS),
            history_soft_limit: get("HISTORY_SOFT_LIMIT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_HISTORY_SOFT_LIMIT),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        }
    }

    /// Seconds the orchestrator will actually wait for a reply.
    ///
    /// A 2 second safety margin is subtracted from `max_reply_secs` so the
    /// request fails before an upstream proxy would cut it off; never below 1.
    pub fn reply_budget_secs(&self) -> u64 {
        self.max_reply_secs.saturating_sub(2).max(1)
    }
}
