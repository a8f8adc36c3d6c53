//! Pluggable conversation persistence
//!
//! One save/load contract, three interchangeable backends:
//!
//! - `MemoryStore` - in-process map (default, no persistence)
//! - `RedisStore` - key-value lists with server-side trimming and TTL
//! - `SqliteStore` - document-style rows (requires the `sqlite` feature)
//!
//! The backend is selected once at startup; every variant truncates to its
//! soft limit on save, oldest turns first.

mod memory;
mod redis_store;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

use crate::types::Turn;
use anyhow::Result;
use async_trait::async_trait;

/// Uniform persistence contract for conversation histories.
///
/// `save` replaces the stored history (truncated to the backend's soft
/// limit); `load` returns an empty vector for unknown ids.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn save(&self, conversation_id: &str, turns: &[Turn]) -> Result<()>;

    async fn load(&self, conversation_id: &str) -> Result<Vec<Turn>>;
}

/// Last `limit` turns; a zero limit disables truncation.
pub(crate) fn truncated(turns: &[Turn], limit: usize) -> &[Turn] {
    if limit > 0 && turns.len() > limit {
        &turns[turns.len() - limit..]
    } else {
        turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turns(n: usize) -> Vec<Turn> {
        (0..n).map(|i| Turn::user(format!("m{}", i))).collect()
    }

    #[test]
    fn test_truncated_keeps_newest() {
        let history = turns(5);
        let kept = truncated(&history, 3);
        assert_eq!(kept.len(), 3);
        assert_eq!(kept[0].message, "m2");
        assert_eq!(kept[2].message, "m4");
    }

    #[test]
    fn test_truncated_is_identity_within_limit() {
        let history = turns(5);
        assert_eq!(truncated(&history, 5), &history[..]);
        assert_eq!(truncated(&history, 200), &history[..]);
    }

    #[test]
    fn test_zero_limit_disables_truncation() {
        let history = turns(5);
        assert_eq!(truncated(&history, 0).len(), 5);
    }
}
