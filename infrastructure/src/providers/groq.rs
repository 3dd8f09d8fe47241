//! Groq (OpenAI-compatible) streaming chat completions.
//!
//! `POST {base_url}/chat/completions` with `stream: true`. The response body
//! is server-sent events; each `data:` line carries a JSON chunk whose
//! `choices[0].delta.content` is the next piece of text, and `data: [DONE]`
//! ends the stream.

use super::sse::SseLineDecoder;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use relay_application::ports::llm_gateway::{
    ChatCompletionRequest, GatewayError, LlmGateway, StreamHandle,
};
use relay_domain::StreamEvent;
use serde_json::Value;
use std::fmt::Display;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Capacity of the provider → orchestrator channel
const EVENT_BUFFER: usize = 64;

#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    /// Whole-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key: None,
            timeout: None,
        }
    }
}

pub struct GroqGateway {
    client: reqwest::Client,
    config: GroqConfig,
}

impl GroqGateway {
    pub fn new(config: GroqConfig) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

/// Request body for the completions endpoint
fn build_payload(request: &ChatCompletionRequest) -> Value {
    serde_json::json!({
        "model": request.model.as_str(),
        "messages": request.messages,
        "temperature": request.temperature,
        "stream": true,
    })
}

/// What one `data:` payload means for the stream
#[derive(Debug, PartialEq)]
enum ChunkOutcome {
    Delta(String),
    Done,
    Error(String),
    Skip,
}

fn parse_chunk(data: &str) -> ChunkOutcome {
    let data = data.trim();
    if data.is_empty() {
        return ChunkOutcome::Skip;
    }
    if data == "[DONE]" {
        return ChunkOutcome::Done;
    }

    let value: Value = match serde_json::from_str(data) {
        Ok(v) => v,
        Err(e) => return ChunkOutcome::Error(format!("Malformed stream chunk: {}", e)),
    };

    if let Some(error) = value.get("error") {
        return ChunkOutcome::Error(error_text(error));
    }

    match value["choices"][0]["delta"]["content"].as_str() {
        Some(text) => ChunkOutcome::Delta(text.to_string()),
        None => ChunkOutcome::Skip,
    }
}

/// `error.message` if present, otherwise the raw error value
fn error_text(error: &Value) -> String {
    error
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| error.to_string())
}

/// Failure text for a non-2xx response
fn status_error(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").map(error_text))
        .unwrap_or_else(|| format!("HTTP {}", status))
}

fn map_send_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_connect() {
        GatewayError::ConnectionError(error.to_string())
    } else {
        GatewayError::RequestFailed(error.to_string())
    }
}

/// Decode the SSE body into [`StreamEvent`]s until `[DONE]`, an error, or
/// the receiver going away.
///
/// A body that ends without `[DONE]` just closes the channel, which the
/// receiver reports as a closed transport.
async fn forward_events<S, B, E>(body: S, tx: mpsc::Sender<StreamEvent>)
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
{
    let mut body = std::pin::pin!(body);
    let mut decoder = SseLineDecoder::default();
    let mut full_text = String::new();

    loop {
        let next = tokio::select! {
            biased;
            _ = tx.closed() => {
                debug!("Stream receiver dropped; abandoning provider response");
                return;
            }
            next = body.next() => next,
        };

        let body_ended = next.is_none();
        let payloads = match next {
            Some(Ok(bytes)) => decoder.push(bytes.as_ref()),
            Some(Err(e)) => {
                warn!("Provider stream read failed: {}", e);
                let _ = tx.send(StreamEvent::Error(format!("Stream read error: {}", e))).await;
                return;
            }
            None => decoder.finish().into_iter().collect(),
        };

        for data in payloads {
            let event = match parse_chunk(&data) {
                ChunkOutcome::Delta(text) => {
                    full_text.push_str(&text);
                    StreamEvent::Delta(text)
                }
                ChunkOutcome::Done => {
                    let _ = tx.send(StreamEvent::Completed(full_text)).await;
                    return;
                }
                ChunkOutcome::Error(message) => {
                    let _ = tx.send(StreamEvent::Error(message)).await;
                    return;
                }
                ChunkOutcome::Skip => continue,
            };
            if tx.send(event).await.is_err() {
                return;
            }
        }

        if body_ended {
            debug!("Provider body ended without [DONE]");
            return;
        }
    }
}

#[async_trait]
impl LlmGateway for GroqGateway {
    fn is_configured(&self) -> bool {
        self.config
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    async fn stream_chat(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<StreamHandle, GatewayError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(GatewayError::NotConfigured)?;

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Sending streaming completion request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&build_payload(&request))
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(status_error(status, &body)));
        }

        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        tokio::spawn(forward_events(response.bytes_stream(), tx));
        Ok(StreamHandle::new(rx))
    }
}
