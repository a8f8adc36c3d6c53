//! SQLite implementation of ConversationStore
//!
//! Document-style storage: one row per conversation holding the full
//! JSON-serialized turn list.

use super::{truncated, ConversationStore};
use crate::types::Turn;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

pub struct SqliteStore {
    conn: Mutex<Connection>,
    soft_limit: usize,
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS conversations (
            id TEXT PRIMARY KEY,
            turns TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        );
        "#,
    )
    .context("Failed to initialize conversation schema")?;
    Ok(())
}

/// Current unix timestamp in milliseconds
fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>, soft_limit: usize) -> Result<Self> {
        let conn = Connection::open(path).context("Failed to open SQLite database")?;
        init_schema(&conn)?;
        Ok(SqliteStore {
            conn: Mutex::new(conn),
            soft_limit,
        })
    }

    /// Private database, used by tests.
    pub fn open_in_memory(soft_limit: usize) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(SqliteStore {
            conn: Mutex::new(conn),
            soft_limit,
        })
    }
}

#[async_trait]
impl ConversationStore for SqliteStore {
    async fn save(&self, conversation_id: &str, turns: &[Turn]) -> Result<()> {
        let encoded = serde_json::to_string(truncated(turns, self.soft_limit))?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO conversations (id, turns, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET turns = ?2, updated_at = ?3",
            params![conversation_id, encoded, unix_timestamp()],
        )?;
        Ok(())
    }

    async fn load(&self, conversation_id: &str) -> Result<Vec<Turn>> {
        let conn = self.conn.lock().unwrap();
        let encoded: Option<String> = conn
            .query_row(
                "SELECT turns FROM conversations WHERE id = ?1",
                params![conversation_id],
                |row| row.get(0),
            )
            .optional()?;

        match encoded {
            Some(encoded) => {
                serde_json::from_str(&encoded).context("corrupt conversation row")
            }
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_load_preserve_order() {
        let store = SqliteStore::open_in_memory(200).unwrap();
        let history = vec![Turn::bot("seed"), Turn::user("first"), Turn::bot("reply")];
        store.save("c1", &history).await.unwrap();
        assert_eq!(store.load("c1").await.unwrap(), history);
    }

    #[tokio::test]
    async fn test_unknown_id_loads_empty() {
        let store = SqliteStore::open_in_memory(200).unwrap();
        assert!(store.load("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_row() {
        let store = SqliteStore::open_in_memory(200).unwrap();
        store.save("c1", &[Turn::bot("seed")]).await.unwrap();

        let longer = vec![Turn::bot("seed"), Turn::user("more")];
        store.save("c1", &longer).await.unwrap();
        assert_eq!(store.load("c1").await.unwrap(), longer);
    }

    #[tokio::test]
    async fn test_save_truncates_oldest_first() {
        let store = SqliteStore::open_in_memory(4).unwrap();
        let history: Vec<Turn> = (0..9).map(|i| Turn::user(format!("m{}", i))).collect();
        store.save("c1", &history).await.unwrap();

        let loaded = store.load("c1").await.unwrap();
        assert_eq!(loaded.len(), 4);
        assert_eq!(loaded[0].message, "m5");
        assert_eq!(loaded[3].message, "m8");
    }

    #[tokio::test]
    async fn test_within_limit_roundtrip_is_identical() {
        let store = SqliteStore::open_in_memory(200).unwrap();
        let history: Vec<Turn> = (0..10).map(|i| Turn::user(format!("m{}", i))).collect();
        store.save("c1", &history).await.unwrap();
        store.save("c1", &store.load("c1").await.unwrap()).await.unwrap();
        assert_eq!(store.load("c1").await.unwrap(), history);
    }
}
