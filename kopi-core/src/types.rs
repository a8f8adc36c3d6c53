//! Conversation data model

use serde::{Deserialize, Serialize};

/// Maximum user message length in characters, after trimming.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Who produced a turn.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// One message in a conversation.
///
/// Immutable once appended; ordering is significant. The first turn of a
/// stored conversation is always a bot seed announcing the topic.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub role: Role,
    pub message: String,
}

impl Turn {
    pub fn user(message: impl Into<String>) -> Self {
        Turn {
            role: Role::User,
            message: message.into(),
        }
    }

    pub fn bot(message: impl Into<String>) -> Self {
        Turn {
            role: Role::Bot,
            message: message.into(),
        }
    }
}

/// Result of one orchestrated chat request: the resolved conversation id and
/// the trailing response window, oldest first.
#[derive(Clone, Debug, Serialize)]
pub struct ChatOutcome {
    pub conversation_id: String,
    pub turns: Vec<Turn>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_constructors() {
        let turn = Turn::user("hello");
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.message, "hello");

        let turn = Turn::bot("hi");
        assert_eq!(turn.role, Role::Bot);
    }

    #[test]
    fn test_turn_json_shape() {
        let turn = Turn::bot("I will prove that dogs are great!");
        let json = serde_json::to_string(&turn).unwrap();
        assert_eq!(
            json,
            r#"{"role":"bot","message":"I will prove that dogs are great!"}"#
        );

        let parsed: Turn = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, turn);
    }
}
