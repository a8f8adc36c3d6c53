//! In-memory conversation storage
//!
//! The default backend - fast, lost on restart.

use super::{truncated, ConversationStore};
use crate::types::Turn;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

pub struct MemoryStore {
    conversations: Mutex<HashMap<String, Vec<Turn>>>,
    soft_limit: usize,
}

impl MemoryStore {
    pub fn new(soft_limit: usize) -> Self {
        MemoryStore {
            conversations: Mutex::new(HashMap::new()),
            soft_limit,
        }
    }
}

#[async_trait]
impl ConversationStore for MemoryStore {
    async fn save(&self, conversation_id: &str, turns: &[Turn]) -> Result<()> {
        let kept = truncated(turns, self.soft_limit).to_vec();
        self.conversations
            .lock()
            .unwrap()
            .insert(conversation_id.to_string(), kept);
        Ok(())
    }

    async fn load(&self, conversation_id: &str) -> Result<Vec<Turn>> {
        Ok(self
            .conversations
            .lock()
            .unwrap()
            .get(conversation_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_load_preserve_order() {
        let store = MemoryStore::new(200);
        let history = vec![Turn::bot("seed"), Turn::user("first"), Turn::bot("reply")];
        store.save("c1", &history).await.unwrap();
        assert_eq!(store.load("c1").await.unwrap(), history);
    }

    #[tokio::test]
    async fn test_unknown_id_loads_empty() {
        let store = MemoryStore::new(200);
        assert!(store.load("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_truncates_oldest_first() {
        let store = MemoryStore::new(3);
        let history: Vec<Turn> = (0..6).map(|i| Turn::user(format!("m{}", i))).collect();
        store.save("c1", &history).await.unwrap();

        let loaded = store.load("c1").await.unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0].message, "m3");
        assert_eq!(loaded[2].message, "m5");
    }

    #[tokio::test]
    async fn test_within_limit_roundtrip_is_identical() {
        let store = MemoryStore::new(200);
        let history: Vec<Turn> = (0..10).map(|i| Turn::user(format!("m{}", i))).collect();
        store.save("c1", &history).await.unwrap();
        store.save("c1", &store.load("c1").await.unwrap()).await.unwrap();
        assert_eq!(store.load("c1").await.unwrap(), history);
    }
}
