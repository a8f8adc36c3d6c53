//! Startup wiring: settings -> storage backend + reply generator
//!
//! Backend selection happens exactly once here and produces immutable
//! application state. Missing or broken credentials downgrade the service
//! (in-memory store, mock replies) with a single log line; they never fail
//! startup.

use std::sync::Arc;

use config::Settings;
use kopi_core::{
    ChatEngine, ConversationStore, MemoryStore, MockGenerator, ModelGenerator, RedisStore,
    ReplyGenerator, SqliteStore,
};
use llm::GeminiProvider;
use tracing::{info, warn};

use crate::server::{AppState, BackendFlags};

/// Select backends from settings and assemble the shared application state.
pub async fn build_state(settings: &Settings) -> AppState {
    let mut backends = BackendFlags::default();

    let store: Arc<dyn ConversationStore> = if let Some(url) = &settings.redis_url {
        match RedisStore::connect(url, settings.history_soft_limit, settings.redis_ttl_secs).await
        {
            Ok(store) => {
                info!("Redis store initialized.");
                backends.redis = true;
                Arc::new(store)
            }
            Err(e) => {
                warn!(
                    "Could not initialize Redis: {:#}. Using in-memory persistence.",
                    e
                );
                Arc::new(MemoryStore::new(settings.history_soft_limit))
            }
        }
    } else if let Some(path) = &settings.sqlite_path {
        match SqliteStore::open(path, settings.history_soft_limit) {
            Ok(store) => {
                info!("SQLite store initialized at {}.", path);
                backends.sqlite = true;
                Arc::new(store)
            }
            Err(e) => {
                warn!(
                    "Could not open SQLite at {}: {:#}. Using in-memory persistence.",
                    path, e
                );
                Arc::new(MemoryStore::new(settings.history_soft_limit))
            }
        }
    } else {
        info!("REDIS_URL and SQLITE_PATH not set. Using in-memory persistence.");
        Arc::new(MemoryStore::new(settings.history_soft_limit))
    };

    let generator: Arc<dyn ReplyGenerator> = match &settings.gemini_api_key {
        Some(key) => {
            let provider = GeminiProvider::default(key);
            let model = provider.create_chat_model(&settings.gemini_model);
            info!("Gemini configured with model {}.", settings.gemini_model);
            backends.gemini = true;
            Arc::new(ModelGenerator::new(model))
        }
        None => {
            info!("GEMINI_API_KEY not set. Using mock responses.");
            Arc::new(MockGenerator)
        }
    };

    AppState {
        engine: ChatEngine::new(store, generator, settings),
        backends,
        max_reply_secs: settings.max_reply_secs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_defaults_select_memory_store_and_mock_generator() {
        let state = build_state(&Settings::default()).await;
        assert!(!state.backends.gemini);
        assert!(!state.backends.redis);
        assert!(!state.backends.sqlite);
    }

    #[tokio::test]
    async fn test_sqlite_path_activates_sqlite_backend() {
        let settings = Settings {
            sqlite_path: Some(":memory:".to_string()),
            ..Settings::default()
        };
        let state = build_state(&settings).await;
        assert!(state.backends.sqlite);
        assert!(!state.backends.redis);
    }

    #[tokio::test]
    async fn test_unreachable_redis_falls_back_to_memory() {
        let settings = Settings {
            redis_url: Some("redis://127.0.0.1:1".to_string()),
            ..Settings::default()
        };
        let state = build_state(&settings).await;
        assert!(!state.backends.redis);
        assert!(!state.backends.sqlite);
    }

    #[tokio::test]
    async fn test_api_key_activates_gemini_generator() {
        let settings = Settings {
            gemini_api_key: Some("test-key".to_string()),
            ..Settings::default()
        };
        let state = build_state(&settings).await;
        assert!(state.backends.gemini);
    }
}
