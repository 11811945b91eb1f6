//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::{ApiError, HealthReport, Message, MessageApi, OutgoingMessage, SendReceipt};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, Settings};

/// Resolved config pointing at a backend that is never contacted.
pub fn test_config() -> ResolvedConfig {
    ResolvedConfig {
        base_url: "http://backend.test:8089".to_string(),
        auto_refresh: false,
        refresh_interval: Duration::from_secs(5),
        prompt_switch_after_send: true,
        switch_prompt_delay: Duration::from_millis(500),
        queue_label: "Kafka".to_string(),
        queue_ui_url: None,
    }
}

pub fn test_app() -> App {
    App::new(Settings::default())
}

pub fn message(id: &str, sender: &str, content: &str) -> Message {
    Message {
        id: Some(id.to_string()),
        sender: Some(sender.to_string()),
        content: Some(content.to_string()),
        timestamp: None,
    }
}

/// In-memory `MessageApi` that records what it was asked to do.
pub struct StubApi {
    pub messages: Mutex<Vec<Message>>,
    pub sent: Mutex<Vec<OutgoingMessage>>,
    pub fail_with: Mutex<Option<ApiError>>,
}

impl StubApi {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages: Mutex::new(messages),
            sent: Mutex::new(Vec::new()),
            fail_with: Mutex::new(None),
        }
    }

    fn failure(&self) -> Option<ApiError> {
        self.fail_with.lock().ok().and_then(|f| f.clone())
    }
}

#[async_trait]
impl MessageApi for StubApi {
    fn base_url(&self) -> &str {
        "http://stub"
    }

    async fn send_message(&self, message: &OutgoingMessage) -> Result<SendReceipt, ApiError> {
        if let Some(e) = self.failure() {
            return Err(e);
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(SendReceipt::default())
    }

    async fn list_messages(&self) -> Result<Vec<Message>, ApiError> {
        if let Some(e) = self.failure() {
            return Err(e);
        }
        Ok(self.messages.lock().unwrap().clone())
    }

    async fn clear_messages(&self) -> Result<(), ApiError> {
        if let Some(e) = self.failure() {
            return Err(e);
        }
        self.messages.lock().unwrap().clear();
        Ok(())
    }

    async fn health(&self) -> Result<HealthReport, ApiError> {
        if let Some(e) = self.failure() {
            return Err(e);
        }
        Ok(HealthReport {
            status: "UP".to_string(),
        })
    }
}
