//! Chat conversation types for the Workflow SG assistant.
//!
//! These types model the wire shapes of `POST /api/chat` and the bounded
//! conversation passed to the agent runner. History arrives as untrusted
//! JSON and is validated element-by-element (see `worksg-core::history`),
//! so the request body keeps `message` and `history` as raw values rather
//! than failing whole-body deserialization on one malformed entry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a turn in a conversation. Exactly two values; anything else in
/// client-supplied history is dropped by the sanitizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRole::User => write!(f, "user"),
            ChatRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for ChatRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(ChatRole::User),
            "assistant" => Ok(ChatRole::Assistant),
            other => Err(format!("invalid chat role: '{other}'")),
        }
    }
}

/// A single turn in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    /// Convenience constructor for a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Convenience constructor for an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Wire body of `POST /api/chat`.
///
/// `message` and `history` stay untyped here: a non-string message is a
/// validation failure (400), and malformed history degrades gracefully to
/// an empty window instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequestBody {
    #[serde(default)]
    pub message: Option<serde_json::Value>,
    #[serde(default)]
    pub history: Option<serde_json::Value>,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// Successful wire response of `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ChatRole::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&ChatRole::Assistant).unwrap(),
            "\"assistant\""
        );
        let parsed: ChatRole = serde_json::from_str("\"assistant\"").unwrap();
        assert_eq!(parsed, ChatRole::Assistant);
    }

    #[test]
    fn test_chat_role_from_str_rejects_unknown() {
        assert!("system".parse::<ChatRole>().is_err());
        assert!("User".parse::<ChatRole>().is_err());
    }

    #[test]
    fn test_request_body_tolerates_malformed_fields() {
        let body: ChatRequestBody =
            serde_json::from_str(r#"{"message": 42, "history": "nope"}"#).unwrap();
        assert!(body.message.is_some());
        assert!(body.history.is_some());
        assert!(body.conversation_id.is_none());
    }

    #[test]
    fn test_request_body_conversation_id_passthrough() {
        let body: ChatRequestBody =
            serde_json::from_str(r#"{"message": "hi", "conversationId": "conv-9"}"#).unwrap();
        assert_eq!(body.conversation_id.as_deref(), Some("conv-9"));
    }
}
