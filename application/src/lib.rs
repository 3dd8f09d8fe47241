//! Application layer for chat-relay
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ChatDefaults;
pub use ports::{
    conversation_logger::{
        ConversationEvent, ConversationEventKind, ConversationLogger, NoConversationLogger,
    },
    llm_gateway::{ChatCompletionRequest, GatewayError, LlmGateway, StreamHandle},
    session_store::{SessionStore, StoreError},
};
pub use use_cases::manage_session::{ClearOutcome, ManageSessionUseCase};
pub use use_cases::stream_chat::{ChatError, ChatStream, StreamChatInput, StreamChatUseCase};
