//! Process-local session store.
//!
//! One `std::sync::Mutex` guards the whole map. Every operation is a short,
//! non-async critical section, so the lock is never held across an await.

use relay_application::ports::session_store::{SessionStore, StoreError};
use relay_domain::{Message, SessionId, SystemPromptChange, Transcript};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;

/// Sessions live until the process exits; there is no eviction.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<SessionId, Transcript>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sessions(&self) -> Result<MutexGuard<'_, HashMap<SessionId, Transcript>>, StoreError> {
        self.sessions
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("session lock poisoned: {}", e)))
    }

    /// Number of known sessions
    pub fn len(&self) -> usize {
        self.sessions().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, session_id: &SessionId) -> bool {
        self.sessions()
            .map(|s| s.contains_key(session_id))
            .unwrap_or(false)
    }
}

impl SessionStore for InMemorySessionStore {
    fn create(&self) -> Result<SessionId, StoreError> {
        let mut sessions = self.sessions()?;
        // v4 collisions are not a practical concern, but never hand out a live id.
        let session_id = loop {
            let candidate = SessionId::try_new(Uuid::new_v4().to_string())
                .map_err(|e| StoreError::Unavailable(e.to_string()))?;
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };
        sessions.insert(session_id.clone(), Transcript::new());
        Ok(session_id)
    }

    fn ensure_initialized(&self, session_id: &SessionId) -> Result<(), StoreError> {
        let mut sessions = self.sessions()?;
        if !sessions.contains_key(session_id) {
            debug!(session_id = %session_id, "Initializing unknown session");
            sessions.insert(session_id.clone(), Transcript::new());
        }
        Ok(())
    }

    fn clear(&self, session_id: &SessionId) -> Result<bool, StoreError> {
        let mut sessions = self.sessions()?;
        let existed = match sessions.get_mut(session_id) {
            Some(transcript) => {
                transcript.clear();
                true
            }
            None => {
                sessions.insert(session_id.clone(), Transcript::new());
                false
            }
        };
        Ok(existed)
    }

    fn read_snapshot(&self, session_id: &SessionId) -> Result<Vec<Message>, StoreError> {
        Ok(self
            .sessions()?
            .get(session_id)
            .map(|transcript| transcript.messages().to_vec())
            .unwrap_or_default())
    }

    fn commit_exchange(
        &self,
        session_id: &SessionId,
        system_prompt: Option<&str>,
        user: &str,
        assistant: &str,
    ) -> Result<SystemPromptChange, StoreError> {
        let mut sessions = self.sessions()?;
        let transcript = sessions.entry(session_id.clone()).or_default();
        Ok(transcript.commit_exchange(system_prompt, user, assistant))
    }
}
