//! Infrastructure layer for chat-relay
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod session;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileChatConfig, FileConfig, FileLoggingConfig,
    FileProviderConfig, FileServerConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::{GroqConfig, GroqGateway};
pub use session::InMemorySessionStore;
