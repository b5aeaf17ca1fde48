//! Chat API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User id stamped on every assistant message
pub const ASSISTANT_USER_ID: &str = "ai-assistant";

/// Message author role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// POST /api/chat request body
///
/// Fields are optional so a missing field surfaces as a validation error
/// rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl ChatRequest {
    /// Returns `(message, session_id, user_id)` when all three are present
    /// and non-empty
    pub fn required_fields(&self) -> Option<(&str, &str, &str)> {
        Some((
            present(&self.message)?,
            present(&self.session_id)?,
            present(&self.user_id)?,
        ))
    }
}

/// Assistant message returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub role: ChatRole,
    pub timestamp: DateTime<Utc>,
    pub session_id: String,
}

impl ChatMessage {
    /// Build an assistant reply for a session
    pub fn assistant(content: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: ASSISTANT_USER_ID.to_string(),
            content: content.into(),
            role: ChatRole::Assistant,
            timestamp: Utc::now(),
            session_id: session_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"message":"hello","sessionId":"s-1","userId":"u-1"}"#,
        )
        .unwrap();
        assert_eq!(req.required_fields(), Some(("hello", "s-1", "u-1")));

        let req: ChatRequest =
            serde_json::from_str(r#"{"sessionId":"s-1","userId":"u-1"}"#).unwrap();
        assert!(req.required_fields().is_none());

        let req: ChatRequest =
            serde_json::from_str(r#"{"message":"","sessionId":"s-1","userId":"u-1"}"#).unwrap();
        assert!(req.required_fields().is_none());
    }

    #[test]
    fn test_assistant_message_serialization() {
        let msg = ChatMessage::assistant("Hi there", "s-9");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["userId"], "ai-assistant");
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["sessionId"], "s-9");
        assert_eq!(json["content"], "Hi there");
        assert!(json["timestamp"].is_string());
        assert!(!msg.id.is_empty());
    }
}
