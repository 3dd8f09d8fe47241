//! Presentation layer for chat-relay
//!
//! This crate contains the CLI definition and the HTTP surface: routes,
//! SSE framing and JSON error responses.

pub mod cli;
pub mod http;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use http::{ApiError, AppState, router};
