//! Per-request turn orchestration
//!
//! Each request runs a full load -> mutate -> save cycle; requests share no
//! mutable conversation state, so concurrent requests only contend inside
//! the store. The only suspension point is reply generation, bounded by the
//! configured budget; a timed-out request persists nothing, leaving the
//! stored history exactly as it was.

use crate::catalog;
use crate::classifier::is_on_topic;
use crate::error::ChatError;
use crate::generate::ReplyGenerator;
use crate::storage::ConversationStore;
use crate::topic::{extract_topic_from_seed, ground_reply, parse_topic_and_stance, seed_message};
use crate::types::{ChatOutcome, Turn, MAX_MESSAGE_CHARS};
use config::Settings;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Turns echoed back per response, oldest first.
pub const RESPONSE_WINDOW: usize = 5;

/// Orchestrates one debate turn per request.
pub struct ChatEngine {
    store: Arc<dyn ConversationStore>,
    generator: Arc<dyn ReplyGenerator>,
    reply_budget: Duration,
}

impl ChatEngine {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        generator: Arc<dyn ReplyGenerator>,
        settings: &Settings,
    ) -> Self {
        ChatEngine {
            store,
            generator,
            reply_budget: Duration::from_secs(settings.reply_budget_secs()),
        }
    }

    /// Run one debate turn.
    ///
    /// Sequence: validate, resolve the conversation id, load history, seed
    /// or recover the topic, append the user turn, ground if the user
    /// drifted, generate the reply under the time budget, persist, and
    /// return the trailing window.
    pub async fn chat(
        &self,
        conversation_id: Option<&str>,
        message: &str,
    ) -> Result<ChatOutcome, ChatError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::InvalidMessage("message must not be empty".into()));
        }
        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(ChatError::InvalidMessage(format!(
                "message exceeds {} characters",
                MAX_MESSAGE_CHARS
            )));
        }

        let conversation_id = match conversation_id.map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => format!("conv_{}", Uuid::new_v4().simple()),
        };

        let mut history = self
            .store
            .load(&conversation_id)
            .await
            .map_err(ChatError::Internal)?;

        // The claim defended this turn is the parsed stance on the seeding
        // request and the recovered topic afterwards.
        let (topic, claim) = if history.is_empty() {
            let (mut topic, stance) = parse_topic_and_stance(message);
            if topic.is_empty() {
                topic = catalog::random_topic().to_string();
            }
            debug!(conversation_id = %conversation_id, topic = %topic, "seeding new conversation");
            history.push(Turn::bot(seed_message(&topic)));
            let claim = if stance.is_empty() { topic.clone() } else { stance };
            (topic, claim)
        } else {
            let topic = extract_topic_from_seed(&history[0].message);
            (topic.clone(), topic)
        };

        history.push(Turn::user(message));

        if !is_on_topic(message, &topic) {
            debug!(conversation_id = %conversation_id, topic = %topic, "user drifted off topic");
            history.push(Turn::bot(ground_reply(&topic)));
        }

        let style = catalog::random_style();

        let reply = match tokio::time::timeout(
            self.reply_budget,
            self.generator.generate_reply(&claim, message, style),
        )
        .await
        {
            Ok(Ok(reply)) => reply,
            Ok(Err(err)) => return Err(ChatError::Internal(err)),
            Err(_) => {
                return Err(ChatError::Timeout {
                    budget_secs: self.reply_budget.as_secs(),
                })
            }
        };

        history.push(Turn::bot(reply));
        self.store
            .save(&conversation_id, &history)
            .await
            .map_err(ChatError::Internal)?;

        let start = history.len().saturating_sub(RESPONSE_WINDOW);
        Ok(ChatOutcome {
            conversation_id,
            turns: history[start..].to_vec(),
        })
    }
}
