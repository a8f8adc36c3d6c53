//! Redis-backed conversation storage
//!
//! Each conversation is a list at `conv:{id}:messages`, one JSON-encoded
//! turn per entry. Saves replace the list wholesale in a single pipeline and
//! trim server-side; an optional TTL is refreshed on every save.

use super::ConversationStore;
use crate::types::Turn;
use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

pub struct RedisStore {
    connection: ConnectionManager,
    soft_limit: usize,
    ttl_secs: Option<u64>,
}

impl RedisStore {
    /// Connect and verify the server is reachable.
    pub async fn connect(url: &str, soft_limit: usize, ttl_secs: Option<u64>) -> Result<Self> {
        let client = redis::Client::open(url).context("invalid Redis URL")?;
        let connection = client
            .get_connection_manager()
            .await
            .context("could not connect to Redis")?;
        Ok(RedisStore {
            connection,
            soft_limit,
            ttl_secs,
        })
    }

    fn key(conversation_id: &str) -> String {
        format!("conv:{}:messages", conversation_id)
    }
}

#[async_trait]
impl ConversationStore for RedisStore {
    async fn save(&self, conversation_id: &str, turns: &[Turn]) -> Result<()> {
        let key = Self::key(conversation_id);
        let mut connection = self.connection.clone();

        let mut pipe = redis::pipe();
        pipe.atomic();
        pipe.del(&key);
        if !turns.is_empty() {
            let encoded = turns
                .iter()
                .map(serde_json::to_string)
                .collect::<Result<Vec<_>, _>>()?;
            // RPUSH keeps the original order; LTRIM keeps the newest entries.
            pipe.rpush(&key, encoded);
            if self.soft_limit > 0 {
                pipe.ltrim(&key, -(self.soft_limit as isize), -1);
            }
        }
        if let Some(ttl) = self.ttl_secs {
            pipe.expire(&key, ttl as i64);
        }

        let _: () = pipe
            .query_async(&mut connection)
            .await
            .context("Redis save failed")?;
        Ok(())
    }

    async fn load(&self, conversation_id: &str) -> Result<Vec<Turn>> {
        let key = Self::key(conversation_id);
        let mut connection = self.connection.clone();

        let raw: Vec<String> = connection
            .lrange(&key, 0, -1)
            .await
            .context("Redis load failed")?;
        raw.iter()
            .map(|entry| serde_json::from_str(entry).context("corrupt turn entry"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(RedisStore::key("conv_42"), "conv:conv_42:messages");
    }
}
