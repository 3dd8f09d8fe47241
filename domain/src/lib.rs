//! Domain layer for chat-relay
//!
//! This crate contains the entities, value objects and pure algorithms of the
//! relay. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Session**: a conversation identified by an opaque [`SessionId`]
//! - **Transcript**: the ordered messages of one session, with at most one
//!   system message pinned at index 0
//! - **Reconciliation**: deciding per request whether a supplied system prompt
//!   is inserted, replaced or already in place

pub mod core;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use core::{
    error::DomainError,
    model::Model,
    prompt::Prompt,
    temperature::{TEMPERATURE_RANGE, check_temperature},
};
pub use session::{
    entities::{Message, Role, SessionId, Transcript},
    reconcile::{OutgoingMessages, SystemPromptChange, build_outgoing, normalize_system_prompt},
    stream::{ChatEvent, StreamEvent},
};
