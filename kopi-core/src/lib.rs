//! Core of the kopi debate service
//!
//! This crate provides:
//! - **Types**: `Turn`, `Role`, `ChatOutcome`
//! - **Extraction**: topic/stance parsing and seed recovery
//! - **Classification**: keyword-overlap drift detection
//! - **Generation**: `ReplyGenerator` with mock and model-backed variants
//! - **Storage**: `ConversationStore` with memory / Redis / SQLite backends
//! - **Engine**: `ChatEngine`, the per-request orchestrator

pub mod catalog;
pub mod classifier;
pub mod engine;
pub mod error;
pub mod generate;
pub mod storage;
pub mod topic;
pub mod types;

pub use engine::{ChatEngine, RESPONSE_WINDOW};
pub use error::ChatError;
pub use generate::{MockGenerator, ModelGenerator, ReplyGenerator};
#[cfg(feature = "sqlite")]
pub use storage::SqliteStore;
pub use storage::{ConversationStore, MemoryStore, RedisStore};
pub use types::{ChatOutcome, Role, Turn};
