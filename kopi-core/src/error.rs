use std::fmt;

/// Errors a chat request surfaces to the transport layer
#[derive(Debug)]
pub enum ChatError {
    /// Message failed validation; no state was touched
    InvalidMessage(String),

    /// Reply generation exceeded the configured budget; nothing was persisted
    Timeout { budget_secs: u64 },

    /// Unexpected storage or generator failure
    Internal(anyhow::Error),
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::InvalidMessage(msg) => write!(f, "Invalid message: {}", msg),
            ChatError::Timeout { budget_secs } => {
                write!(f, "Reply generation exceeded {}s budget", budget_secs)
            }
            ChatError::Internal(err) => write!(f, "Internal error: {}", err),
        }
    }
}

impl std::error::Error for ChatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChatError::Internal(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for ChatError {
    fn from(err: anyhow::Error) -> Self {
        ChatError::Internal(err)
    }
}
