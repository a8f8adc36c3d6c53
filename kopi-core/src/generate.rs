//! Reply generation
//!
//! `ReplyGenerator` is the seam between the orchestrator and the external
//! text model. The mock variant keeps the service fully functional offline;
//! the model-backed variant never lets an upstream error reach the caller.

use anyhow::Result;
use async_trait::async_trait;
use llm::ChatModel;
use tracing::warn;

/// Produces the bot's reply for one debate turn.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Generate a reply defending `claim` against `user_message`, flavored
    /// by the argument `style`.
    async fn generate_reply(&self, claim: &str, user_message: &str, style: &str)
        -> Result<String>;
}

/// Deterministic offline generator, used when no API key is configured.
pub struct MockGenerator;

#[async_trait]
impl ReplyGenerator for MockGenerator {
    async fn generate_reply(
        &self,
        claim: &str,
        user_message: &str,
        style: &str,
    ) -> Result<String> {
        Ok(format!(
            "**{}** — (mock)\nStyle: {}\nYou said: *{}*.\nMy stance remains firm. Which part do you disagree with the most?",
            claim, style, user_message
        ))
    }
}

/// Generator backed by an external chat model.
///
/// Upstream failures never propagate: one retry with a shortened prompt,
/// then a deterministic still-defending fallback string.
pub struct ModelGenerator {
    model: Box<dyn ChatModel>,
}

impl ModelGenerator {
    pub fn new(model: impl ChatModel + 'static) -> Self {
        ModelGenerator {
            model: Box::new(model),
        }
    }
}

#[async_trait]
impl ReplyGenerator for ModelGenerator {
    async fn generate_reply(
        &self,
        claim: &str,
        user_message: &str,
        style: &str,
    ) -> Result<String> {
        let prompt = build_prompt(claim, user_message, style);
        let first_error = match self.model.generate(&prompt).await {
            Ok(text) => return Ok(text),
            Err(err) => err,
        };
        warn!(
            model = self.model.name(),
            error = %first_error,
            "reply generation failed, retrying with shortened prompt"
        );

        match self.model.generate(&short_prompt(claim, user_message)).await {
            Ok(text) => Ok(text),
            Err(err) => {
                warn!(
                    model = self.model.name(),
                    error = %err,
                    "retry failed, using fallback reply"
                );
                Ok(fallback_reply(claim))
            }
        }
    }
}

/// Full debate prompt: the claim to defend at all costs, the ground rules,
/// the argument-style label, and the latest user message.
fn build_prompt(claim: &str, user_message: &str, style: &str) -> String {
    format!(
        r#"You must defend "**{claim}**" at all costs.

Guidelines:
- Stand your ground: never change your stance.
- Be persuasive: logical reasoning, examples, rhetorical techniques.
- Stay on topic: relate everything to the original claim.
- Extend the discussion: invite follow-ups.
- Keep responses concise (must complete in <30s).
- Your argument style is: **{style}**.

Conversation:
User: {user_message}
AI:"#
    )
}

fn short_prompt(claim: &str, user_message: &str) -> String {
    format!(
        "Defend \"{}\" briefly and without changing your stance. The user said: {}",
        claim, user_message
    )
}

fn fallback_reply(claim: &str) -> String {
    format!(
        "I could not reach my sources just now, but my stance is unchanged: {}. Tell me which part you doubt and I will take it on directly.",
        claim
    )
}
