//! # Composer
//!
//! The message-submission feature: the draft being typed, its validation,
//! and the inline status shown under the form.

use std::fmt;

use crate::api::{ApiError, OutgoingMessage};

pub const MAX_SENDER_CHARS: usize = 50;
pub const MAX_CONTENT_CHARS: usize = 500;

pub const FILL_ALL_FIELDS: &str = "Please fill in all fields";
pub const SENT_TEXT: &str = "Message sent to the queue!";
const SEND_FAILED_DEFAULT: &str = "Failed to send message";

/// Transient per-feature status. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Success(String),
    Error(String),
}

impl Status {
    pub fn is_loading(&self) -> bool {
        matches!(self, Status::Loading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Sender,
    Content,
}

impl DraftField {
    pub fn label(self) -> &'static str {
        match self {
            DraftField::Sender => "Your name",
            DraftField::Content => "Message text",
        }
    }

    pub fn max_chars(self) -> usize {
        match self {
            DraftField::Sender => MAX_SENDER_CHARS,
            DraftField::Content => MAX_CONTENT_CHARS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A field is empty or whitespace-only.
    Empty,
    TooLong { field: DraftField, max: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty => write!(f, "{FILL_ALL_FIELDS}"),
            ValidationError::TooLong { field, max } => {
                write!(f, "{} is too long (max {max} characters)", field.label())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// The in-progress form. Owned by the composer and only reset after a successful send.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    pub sender: String,
    pub content: String,
}

impl Draft {
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Sender => &self.sender,
            DraftField::Content => &self.content,
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Sender => self.sender = value,
            DraftField::Content => self.content = value,
        }
    }

    /// Check the draft and build the request body. Values are sent as typed.
    pub fn validate(&self) -> Result<OutgoingMessage, ValidationError> {
        if self.sender.trim().is_empty() || self.content.trim().is_empty() {
            return Err(ValidationError::Empty);
        }
        for field in [DraftField::Sender, DraftField::Content] {
            let max = field.max_chars();
            if self.field(field).chars().count() > max {
                return Err(ValidationError::TooLong { field, max });
            }
        }
        Ok(OutgoingMessage {
            content: self.content.clone(),
            sender: self.sender.clone(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.sender.is_empty() && self.content.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct ComposerState {
    pub draft: Draft,
    pub status: Status,
}

impl ComposerState {
    /// True while a send is in flight; the submit control is disabled.
    pub fn is_sending(&self) -> bool {
        self.status.is_loading()
    }
}

/// User-facing text for a failed send.
pub fn send_error_text(error: &ApiError) -> String {
    if error.is_transport() {
        return format!("Network error: {error}");
    }
    match error.server_message() {
        Some(message) => format!("Error: {message}"),
        None => match error {
            ApiError::Http { status, .. } => format!("Error: {SEND_FAILED_DEFAULT} (HTTP {status})"),
            _ => format!("Error: {SEND_FAILED_DEFAULT}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(sender: &str, content: &str) -> Draft {
        Draft {
            sender: sender.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_validate_rejects_empty_and_whitespace() {
        assert_eq!(draft("", "Hi").validate(), Err(ValidationError::Empty));
        assert_eq!(draft("Ann", "").validate(), Err(ValidationError::Empty));
        assert_eq!(draft("   ", "Hi").validate(), Err(ValidationError::Empty));
        assert_eq!(draft("Ann", "\n\t ").validate(), Err(ValidationError::Empty));
    }

    #[test]
    fn test_validate_sends_values_as_typed() {
        let body = draft(" Ann ", "Hello ").validate().unwrap();
        assert_eq!(body.sender, " Ann ");
        assert_eq!(body.content, "Hello ");
    }

    #[test]
    fn test_validate_counts_chars_not_bytes() {
        let name = "Ж".repeat(MAX_SENDER_CHARS);
        assert!(draft(&name, "Hi").validate().is_ok());

        let too_long = "a".repeat(MAX_CONTENT_CHARS + 1);
        assert_eq!(
            draft("Ann", &too_long).validate(),
            Err(ValidationError::TooLong {
                field: DraftField::Content,
                max: MAX_CONTENT_CHARS
            })
        );
    }

    #[test]
    fn test_validation_message() {
        assert_eq!(ValidationError::Empty.to_string(), "Please fill in all fields");
        let err = ValidationError::TooLong {
            field: DraftField::Sender,
            max: 50,
        };
        assert_eq!(err.to_string(), "Your name is too long (max 50 characters)");
    }

    #[test]
    fn test_send_error_text_prefers_server_message() {
        let err = ApiError::Rejected(Some("Topic not found".into()));
        assert_eq!(send_error_text(&err), "Error: Topic not found");

        let err = ApiError::Http {
            status: 503,
            message: None,
        };
        assert_eq!(send_error_text(&err), "Error: Failed to send message (HTTP 503)");

        assert_eq!(
            send_error_text(&ApiError::Rejected(None)),
            "Error: Failed to send message"
        );
    }

    #[test]
    fn test_send_error_text_for_transport_failures() {
        let err = ApiError::Network("connection refused".into());
        assert_eq!(send_error_text(&err), "Network error: connection refused");
    }

    #[test]
    fn test_status_is_loading() {
        assert!(Status::Loading.is_loading());
        assert!(!Status::Idle.is_loading());
        assert!(!Status::Error("x".into()).is_loading());
    }
}
