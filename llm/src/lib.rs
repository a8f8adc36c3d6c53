//! Minimal client for the external generative-text API
//!
//! This crate wraps the Google Gemini `generateContent` endpoint behind a
//! small trait so the rest of the service never touches wire formats:
//!
//! - **Trait**: `ChatModel` - a single-shot prompt-to-text model
//! - **Provider**: `GeminiProvider` - holds credentials and builds models
//! - **Client**: `Client` - thin reqwest wrapper with trace logging

use async_trait::async_trait;

pub mod client;
pub mod providers;

pub use client::Client;
pub use providers::{GeminiChatModel, GeminiProvider};

/// A text-generation model addressed with a single prompt string.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Model identifier, as the provider names it.
    fn name(&self) -> &str;

    /// Generate a completion for `prompt`.
    ///
    /// Errors carry the upstream status and body; callers decide whether to
    /// retry or fall back.
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}
