//! Session store port
//!
//! The store is the single owner of conversation state. Every operation is a
//! short critical section; callers never hold it across provider I/O, which is
//! why reads hand back a copy.

use relay_domain::{Message, SessionId, SystemPromptChange};
use thiserror::Error;

/// Errors from session storage.
///
/// The in-memory store only fails when its lock is poisoned; an external
/// store would surface I/O problems here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

/// Mapping from session id to transcript.
pub trait SessionStore: Send + Sync {
    /// Generate a fresh id and register an empty transcript for it.
    fn create(&self) -> Result<SessionId, StoreError>;

    /// Register an empty transcript if the id is unknown; no-op otherwise.
    fn ensure_initialized(&self, session_id: &SessionId) -> Result<(), StoreError>;

    /// Empty the transcript (creating it if unknown).
    ///
    /// Returns whether the session existed before the call.
    fn clear(&self, session_id: &SessionId) -> Result<bool, StoreError>;

    /// Ordered copy of the current transcript (empty if unknown).
    fn read_snapshot(&self, session_id: &SessionId) -> Result<Vec<Message>, StoreError>;

    /// Atomically upsert the system message (if supplied) and append the
    /// user/assistant pair to whatever transcript exists now.
    fn commit_exchange(
        &self,
        session_id: &SessionId,
        system_prompt: Option<&str>,
        user: &str,
        assistant: &str,
    ) -> Result<SystemPromptChange, StoreError>;
}
