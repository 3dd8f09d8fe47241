//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod manage_session;
pub mod stream_chat;

#[cfg(test)]
pub(crate) mod test_support;
