//! Wire types for the message relay backend.
//!
//! The backend has shipped under two field-naming schemes (`sender`/`content`
//! and `username`/`message`), so incoming messages accept both.

use serde::{Deserialize, Serialize};

/// Value the backend puts in `status` when an operation succeeded.
pub const STATUS_SUCCESS: &str = "success";

/// A message as returned by `GET /api/messages/list`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct Message {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "username")]
    pub sender: Option<String>,
    #[serde(default, alias = "message")]
    pub content: Option<String>,
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
}

/// Message timestamps arrive either as date-time strings or epoch milliseconds.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Timestamp {
    Text(String),
    Millis(f64),
}

impl Timestamp {
    /// Blank text, zero, and NaN carry no point in time.
    pub fn is_blank(&self) -> bool {
        match self {
            Timestamp::Text(s) => s.trim().is_empty(),
            Timestamp::Millis(n) => *n == 0.0 || n.is_nan(),
        }
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timestamp::Text(s) => write!(f, "{s}"),
            Timestamp::Millis(n) => write!(f, "{n}"),
        }
    }
}

/// Request body for `POST /api/messages/send`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub content: String,
    pub sender: String,
}

/// Response body for `POST /api/messages/send`.
#[derive(Deserialize, Debug, Default)]
pub(crate) struct SendResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response body for `GET /api/messages/list`.
#[derive(Deserialize, Debug)]
pub(crate) struct ListResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub messages: Option<Vec<Message>>,
}

/// What the send endpoint acknowledged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SendReceipt {
    /// Optional human-readable note from the server.
    pub message: Option<String>,
}

/// Result of probing `GET /api/messages/health`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_accepts_sender_content_names() {
        let json = r#"{"id":"abc123","sender":"Ann","content":"Hello","timestamp":"2024-01-01T00:00:00Z"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id.as_deref(), Some("abc123"));
        assert_eq!(msg.sender.as_deref(), Some("Ann"));
        assert_eq!(msg.content.as_deref(), Some("Hello"));
        assert_eq!(
            msg.timestamp,
            Some(Timestamp::Text("2024-01-01T00:00:00Z".to_string()))
        );
    }

    #[test]
    fn test_message_accepts_username_message_names() {
        let json = r#"{"username":"Bob","message":"Hi there","timestamp":1704067200000}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, None);
        assert_eq!(msg.sender.as_deref(), Some("Bob"));
        assert_eq!(msg.content.as_deref(), Some("Hi there"));
        assert_eq!(msg.timestamp, Some(Timestamp::Millis(1704067200000.0)));
    }

    #[test]
    fn test_message_tolerates_missing_fields() {
        let msg: Message = serde_json::from_str("{}").unwrap();
        assert_eq!(msg, Message::default());
    }

    #[test]
    fn test_outgoing_message_field_names() {
        let body = OutgoingMessage {
            content: "Hello".to_string(),
            sender: "Ann".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"content": "Hello", "sender": "Ann"}));
    }

    #[test]
    fn test_timestamp_display_keeps_raw_value() {
        assert_eq!(Timestamp::Text("yesterday".into()).to_string(), "yesterday");
        assert_eq!(Timestamp::Millis(1704067200000.0).to_string(), "1704067200000");
    }

    #[test]
    fn test_timestamp_blank_values() {
        let msg: Message = serde_json::from_str(r#"{"timestamp": ""}"#).unwrap();
        assert!(msg.timestamp.is_some_and(|ts| ts.is_blank()));
        let msg: Message = serde_json::from_str(r#"{"timestamp": 0}"#).unwrap();
        assert!(msg.timestamp.is_some_and(|ts| ts.is_blank()));
        assert!(!Timestamp::Text("2024-01-01".into()).is_blank());
        assert!(!Timestamp::Millis(1.0).is_blank());
    }
}
