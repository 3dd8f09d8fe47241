//! LLM provider adapters
//!
//! The relay talks to a single OpenAI-compatible endpoint (Groq by default).

mod groq;
mod sse;

pub use groq::{GroqConfig, GroqGateway};
