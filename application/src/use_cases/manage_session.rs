//! Session lifecycle use case: create and clear.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::session_store::{SessionStore, StoreError};
use relay_domain::SessionId;
use std::sync::Arc;
use tracing::info;

/// Result of clearing a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearOutcome {
    /// Whether the session was known before the clear
    pub existed: bool,
}

impl ClearOutcome {
    /// Human-readable confirmation sent back to the client
    pub fn message(&self) -> &'static str {
        if self.existed {
            "Backend chat history cleared for this session."
        } else {
            "Backend session history was not found (or was new) and is now initialized empty."
        }
    }
}

#[derive(Clone)]
pub struct ManageSessionUseCase {
    store: Arc<dyn SessionStore>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ManageSessionUseCase {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Start a new session with an empty transcript.
    pub fn create(&self) -> Result<SessionId, StoreError> {
        let session_id = self.store.create()?;
        info!(session_id = %session_id, "Created new session");
        self.conversation_logger
            .log(ConversationEvent::session_created(&session_id));
        Ok(session_id)
    }

    /// Empty a session's transcript. Unknown ids end up initialized.
    pub fn clear(&self, session_id: &SessionId) -> Result<ClearOutcome, StoreError> {
        let existed = self.store.clear(session_id)?;
        info!(session_id = %session_id, existed, "Cleared session history");
        self.conversation_logger
            .log(ConversationEvent::session_cleared(session_id, existed));
        Ok(ClearOutcome { existed })
    }
}
