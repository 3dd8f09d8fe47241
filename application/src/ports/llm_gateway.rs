//! LLM Gateway port
//!
//! Defines the interface for streaming chat completions from an LLM provider.

use async_trait::async_trait;
use relay_domain::{Message, Model, StreamEvent};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Provider credential not configured")]
    NotConfigured,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Transport closed")]
    TransportClosed,

    #[error("Other error: {0}")]
    Other(String),
}

/// One streaming completion request
#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletionRequest {
    /// Ordered, role-tagged messages, replayed as-is
    pub messages: Vec<Message>,
    pub model: Model,
    pub temperature: f32,
}

/// Handle for receiving streaming events from a provider.
///
/// Wraps an `mpsc::Receiver<StreamEvent>`. Dropping the handle tells the
/// producer nobody is listening any more.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Wait for the next provider event. `None` means the producer went away.
    pub async fn next_event(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to the provider.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Whether a provider credential is available
    fn is_configured(&self) -> bool;

    /// Start a streaming completion.
    ///
    /// Errors returned here happen before the first delta (connection,
    /// HTTP status). Failures after that arrive as [`StreamEvent::Error`].
    async fn stream_chat(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<StreamHandle, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn next_event_yields_in_order_then_none() {
        let (tx, rx) = mpsc::channel(8);
        tx.send(StreamEvent::Delta("par".into())).await.unwrap();
        tx.send(StreamEvent::Error("boom".into())).await.unwrap();
        drop(tx);

        let mut handle = StreamHandle::new(rx);
        assert_eq!(handle.next_event().await, Some(StreamEvent::Delta("par".into())));
        assert_eq!(handle.next_event().await, Some(StreamEvent::Error("boom".into())));
        assert_eq!(handle.next_event().await, None);
    }

    #[test]
    fn request_failure_message_wraps_provider_text() {
        assert_eq!(
            GatewayError::RequestFailed("HTTP 429".into()).to_string(),
            "Request failed: HTTP 429"
        );
    }
}
