use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::StatusCode;

use super::types::{
    HealthReport, ListResponse, Message, OutgoingMessage, STATUS_SUCCESS, SendReceipt,
    SendResponse,
};

pub const SEND_PATH: &str = "/api/messages/send";
pub const LIST_PATH: &str = "/api/messages/list";
pub const CLEAR_PATH: &str = "/api/messages/clear";
pub const HEALTH_PATH: &str = "/api/messages/health";

/// Errors that can occur while talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Transport failure (DNS, connection refused, reset).
    Network(String),
    /// Backend answered with a non-2xx status.
    Http { status: u16, message: Option<String> },
    /// Backend answered 2xx but its `status` field was not "success".
    Rejected(Option<String>),
    /// Body could not be decoded.
    Parse(String),
}

impl ApiError {
    /// Message the server attached to the failure, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } | ApiError::Rejected(message) => message.as_deref(),
            ApiError::Network(_) | ApiError::Parse(_) => None,
        }
    }

    /// True when the request never produced a usable response.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Parse(_))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "{msg}"),
            ApiError::Http {
                status,
                message: Some(message),
            } => write!(f, "HTTP error {status}: {message}"),
            ApiError::Http {
                status,
                message: None,
            } => write!(f, "HTTP error {status}"),
            ApiError::Rejected(Some(message)) => write!(f, "rejected by server: {message}"),
            ApiError::Rejected(None) => write!(f, "rejected by server"),
            ApiError::Parse(msg) => write!(f, "invalid response: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The operations the UI performs against the relay backend.
#[async_trait]
pub trait MessageApi: Send + Sync {
    /// Base address requests are sent to, for display.
    fn base_url(&self) -> &str;

    async fn send_message(&self, message: &OutgoingMessage) -> Result<SendReceipt, ApiError>;

    async fn list_messages(&self) -> Result<Vec<Message>, ApiError>;

    async fn clear_messages(&self) -> Result<(), ApiError>;

    async fn health(&self) -> Result<HealthReport, ApiError>;
}

/// reqwest-backed client for the relay backend.
pub struct HttpMessageApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpMessageApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Pull the body as text, mapping transport failures.
async fn read_body(response: reqwest::Response) -> Result<(StatusCode, String), ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    debug!("Response {} ({} bytes)", status, body.len());
    Ok((status, body))
}

/// Best-effort extraction of a `message` field from an error body.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<SendResponse>(body)
        .ok()
        .and_then(|r| r.message)
        .filter(|m| !m.trim().is_empty())
}

#[async_trait]
impl MessageApi for HttpMessageApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send_message(&self, message: &OutgoingMessage) -> Result<SendReceipt, ApiError> {
        info!(
            "POST {} (sender_len={}, content_len={})",
            SEND_PATH,
            message.sender.len(),
            message.content.len()
        );

        let response = self
            .client
            .post(self.url(SEND_PATH))
            .json(message)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let (status, body) = read_body(response).await?;

        if !status.is_success() {
            warn!("Send failed: HTTP {} - {}", status.as_u16(), body);
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        // An empty acknowledgement carries no status field to contradict success
        if body.trim().is_empty() {
            return Ok(SendReceipt::default());
        }

        let parsed: SendResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))?;

        match parsed.status.as_deref() {
            None | Some(STATUS_SUCCESS) => Ok(SendReceipt {
                message: parsed.message,
            }),
            Some(other) => {
                warn!("Send rejected: status={}", other);
                Err(ApiError::Rejected(parsed.message))
            }
        }
    }

    async fn list_messages(&self) -> Result<Vec<Message>, ApiError> {
        debug!("GET {}", LIST_PATH);

        let response = self
            .client
            .get(self.url(LIST_PATH))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let (status, body) = read_body(response).await?;

        if !status.is_success() {
            warn!("List failed: HTTP {}", status.as_u16());
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let parsed: ListResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))?;

        match (parsed.status.as_deref(), parsed.messages) {
            (Some(STATUS_SUCCESS), Some(messages)) => {
                debug!("Listed {} messages", messages.len());
                Ok(messages)
            }
            (status, _) => {
                warn!("List rejected: status={:?}", status);
                Err(ApiError::Rejected(parsed.message))
            }
        }
    }

    async fn clear_messages(&self) -> Result<(), ApiError> {
        info!("DELETE {}", CLEAR_PATH);

        let response = self
            .client
            .delete(self.url(CLEAR_PATH))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let (status, body) = read_body(response).await?;

        if !status.is_success() {
            warn!("Clear failed: HTTP {} - {}", status.as_u16(), body);
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(())
    }

    async fn health(&self) -> Result<HealthReport, ApiError> {
        debug!("GET {}", HEALTH_PATH);

        let response = self
            .client
            .get(self.url(HEALTH_PATH))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let (status, body) = read_body(response).await?;

        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(HealthReport {
            status: health_status(&body),
        })
    }
}

/// Health bodies vary between backends: a JSON object with `status`, or plain text.
fn health_status(body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        if let Some(status) = value.get("status").and_then(|s| s.as_str()) {
            return status.to_string();
        }
        if let Some(text) = value.as_str() {
            return text.to_string();
        }
    }
    if trimmed.is_empty() {
        "UP".to_string()
    } else {
        trimmed.to_string()
    }
}
