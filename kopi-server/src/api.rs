//! JSON request/response schemas for the HTTP surface

use kopi_core::Turn;
use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    /// Conversation ID. If null/omitted, starts a new conversation.
    #[serde(default)]
    pub conversation_id: Option<String>,
    /// User's message.
    pub message: String,
}

/// Successful `POST /chat` payload: the trailing turn window, oldest first.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub conversation_id: String,
    pub message: Vec<Turn>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}
