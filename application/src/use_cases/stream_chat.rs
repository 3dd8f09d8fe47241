//! Stream Chat use case.
//!
//! Turns one chat request into one streamed provider exchange and at most one
//! transcript update:
//!
//! ```text
//! VALIDATING ──► STREAMING ──► COMMITTED_SUCCESS   (Final event)
//!      │              └──────► DISCARDED_ON_ERROR  (Failed event)
//!      └─────────────────────► DISCARDED_ON_ERROR  (Failed event)
//! ```
//!
//! Each request runs on its own task and pushes [`ChatEvent`]s into a bounded
//! channel. All chunks precede exactly one final event. The store is only
//! touched in short critical sections (snapshot before the provider call,
//! commit after it), never across provider I/O.
//!
//! A client that disconnects mid-stream is treated like a provider failure:
//! the turn is discarded and no final event is produced.

use crate::config::ChatDefaults;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{ChatCompletionRequest, GatewayError, LlmGateway};
use crate::ports::session_store::{SessionStore, StoreError};
use futures::Stream;
use relay_domain::util::preview;
use relay_domain::{
    ChatEvent, DomainError, Model, Prompt, SessionId, StreamEvent, build_outgoing,
    check_temperature, normalize_system_prompt,
};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Errors that end a chat request.
///
/// The display string of each variant is what the client sees in the
/// terminal error event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("provider not configured")]
    ProviderNotConfigured,

    #[error("LLM Error: {0}")]
    Provider(GatewayError),

    #[error("Session store error: {0}")]
    Store(#[from] StoreError),

    #[error("server shutting down")]
    ShuttingDown,
}

impl From<GatewayError> for ChatError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::NotConfigured => ChatError::ProviderNotConfigured,
            other => ChatError::Provider(other),
        }
    }
}

impl ChatError {
    /// Caller mistakes, as opposed to server-side failures
    pub fn is_client_error(&self) -> bool {
        matches!(self, ChatError::Invalid(e) if e.is_validation())
    }
}

/// Input for the [`StreamChatUseCase`].
///
/// Raw request fields; validation happens inside the use case so that every
/// failure is reported through the event stream.
#[derive(Debug, Clone, Default)]
pub struct StreamChatInput {
    pub session_id: String,
    pub prompt: String,
    pub system_prompt: Option<String>,
    pub temperature: Option<f32>,
    pub model: Option<Model>,
}

impl StreamChatInput {
    pub fn new(session_id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = Some(model);
        self
    }
}

/// Receiving side of one chat request.
///
/// Dropping it signals a client disconnect to the producing task.
pub struct ChatStream {
    receiver: mpsc::Receiver<ChatEvent>,
}

impl ChatStream {
    fn new(receiver: mpsc::Receiver<ChatEvent>) -> Self {
        Self { receiver }
    }

    pub async fn recv(&mut self) -> Option<ChatEvent> {
        self.receiver.recv().await
    }

    /// Drain every event until the producer finishes.
    pub async fn collect_events(mut self) -> Vec<ChatEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.receiver.recv().await {
            events.push(event);
        }
        events
    }
}

impl Stream for ChatStream {
    type Item = ChatEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

/// How a request that did not fail ended
enum ExchangeOutcome {
    Committed(String),
    Disconnected { streamed: usize },
}

/// Use case for streaming one chat turn (the stream orchestrator).
#[derive(Clone)]
pub struct StreamChatUseCase {
    gateway: Arc<dyn LlmGateway>,
    store: Arc<dyn SessionStore>,
    defaults: ChatDefaults,
    conversation_logger: Arc<dyn ConversationLogger>,
    shutdown: CancellationToken,
}

impl StreamChatUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            gateway,
            store,
            defaults: ChatDefaults::default(),
            conversation_logger: Arc::new(NoConversationLogger),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_defaults(mut self, defaults: ChatDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// In-flight streams end with a "server shutting down" error once the
    /// token is cancelled.
    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn defaults(&self) -> &ChatDefaults {
        &self.defaults
    }

    /// Start a chat turn and return its event stream.
    ///
    /// Spawns the producing task on the current tokio runtime.
    pub fn handle_chat(&self, input: StreamChatInput) -> ChatStream {
        let (tx, rx) = mpsc::channel(self.defaults.stream_buffer.max(1));
        let this = self.clone();
        tokio::spawn(async move { this.run(input, tx).await });
        ChatStream::new(rx)
    }

    async fn run(self, input: StreamChatInput, tx: mpsc::Sender<ChatEvent>) {
        let session_label = input.session_id.clone();

        let terminal = match self.exchange(input, &tx).await {
            Ok(ExchangeOutcome::Committed(full_response)) => ChatEvent::Final(full_response),
            Ok(ExchangeOutcome::Disconnected { streamed }) => {
                warn!(
                    session_id = %session_label,
                    streamed_chars = streamed,
                    "Client disconnected mid-stream; discarding turn"
                );
                self.log_discarded(&session_label, "client_disconnected");
                return;
            }
            Err(e) => {
                if e.is_client_error() {
                    warn!(session_id = %session_label, "Rejected chat request: {}", e);
                } else {
                    error!(session_id = %session_label, "Chat request failed: {}", e);
                }
                self.log_discarded(&session_label, &e.to_string());
                ChatEvent::Failed(e.to_string())
            }
        };

        if tx.send(terminal).await.is_err() {
            debug!(session_id = %session_label, "Client gone before final event");
        }
    }

    async fn exchange(
        &self,
        input: StreamChatInput,
        tx: &mpsc::Sender<ChatEvent>,
    ) -> Result<ExchangeOutcome, ChatError> {
        // ==================== Validating ====================
        let session_id = SessionId::try_new(input.session_id)?;
        self.store.ensure_initialized(&session_id)?;
        let prompt = Prompt::try_new(input.prompt)?;
        let temperature =
            check_temperature(input.temperature.unwrap_or(self.defaults.temperature))?;
        if !self.gateway.is_configured() {
            return Err(ChatError::ProviderNotConfigured);
        }

        let system_prompt = normalize_system_prompt(input.system_prompt.as_deref());
        let model = input.model.unwrap_or_else(|| self.defaults.model.clone());

        let snapshot = self.store.read_snapshot(&session_id)?;
        let outgoing = build_outgoing(&snapshot, system_prompt.as_deref(), prompt.content());

        info!(
            session_id = %session_id,
            model = %model,
            messages = outgoing.messages.len(),
            system_change = outgoing.system_change.as_str(),
            "Calling LLM. System: '{}...', User: '{}...'",
            preview(system_prompt.as_deref().unwrap_or(""), 30),
            preview(prompt.content(), 50)
        );

        // ==================== Streaming ====================
        let model_label = model.to_string();
        let request = ChatCompletionRequest {
            messages: outgoing.messages,
            model,
            temperature,
        };
        let mut handle = tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => return Err(ChatError::ShuttingDown),
            result = self.gateway.stream_chat(request) => result?,
        };

        let mut full_response = String::new();
        loop {
            let event = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => return Err(ChatError::ShuttingDown),
                _ = tx.closed() => {
                    return Ok(ExchangeOutcome::Disconnected {
                        streamed: full_response.chars().count(),
                    });
                }
                event = handle.next_event() => event,
            };

            match event {
                Some(StreamEvent::Delta(chunk)) => {
                    if chunk.is_empty() {
                        continue;
                    }
                    full_response.push_str(&chunk);
                    if tx.send(ChatEvent::Chunk(chunk)).await.is_err() {
                        return Ok(ExchangeOutcome::Disconnected {
                            streamed: full_response.chars().count(),
                        });
                    }
                }
                Some(StreamEvent::Completed(_)) => break,
                Some(StreamEvent::Error(message)) => {
                    return Err(GatewayError::RequestFailed(message).into());
                }
                None => return Err(GatewayError::TransportClosed.into()),
            }
        }
        drop(handle);

        // ==================== Committing ====================
        let change = self.store.commit_exchange(
            &session_id,
            system_prompt.as_deref(),
            prompt.content(),
            &full_response,
        )?;

        info!(
            session_id = %session_id,
            response_chars = full_response.chars().count(),
            system_change = change.as_str(),
            "LLM response committed"
        );
        self.conversation_logger.log(ConversationEvent::chat_committed(
            &session_id,
            &model_label,
            change,
            prompt.content(),
            &full_response,
        ));

        Ok(ExchangeOutcome::Committed(full_response))
    }

    fn log_discarded(&self, session_id: &str, reason: &str) {
        self.conversation_logger
            .log(ConversationEvent::chat_discarded(session_id, reason));
    }
}
