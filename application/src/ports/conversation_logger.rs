//! Audit trail port.
//!
//! Every session lifecycle change and every chat turn outcome is reported to a
//! [`ConversationLogger`] as a [`ConversationEvent`]. Operational diagnostics
//! stay on `tracing`; this port is the durable record of what the relay
//! committed and what it threw away.

use relay_domain::{SessionId, SystemPromptChange};
use serde_json::{Map, Value, json};

/// What happened to a session or a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationEventKind {
    SessionCreated,
    SessionCleared,
    ChatCommitted,
    ChatDiscarded,
}

impl ConversationEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationEventKind::SessionCreated => "session_created",
            ConversationEventKind::SessionCleared => "session_cleared",
            ConversationEventKind::ChatCommitted => "chat_committed",
            ConversationEventKind::ChatDiscarded => "chat_discarded",
        }
    }
}

/// One audit record, keyed by the session it concerns.
///
/// `session_id` is the raw caller-supplied value so rejected requests can be
/// recorded too; it may be empty for a discard.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationEvent {
    pub kind: ConversationEventKind,
    pub session_id: String,
    pub details: Map<String, Value>,
}

impl ConversationEvent {
    fn with_details(kind: ConversationEventKind, session_id: &str, details: Value) -> Self {
        let details = match details {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            kind,
            session_id: session_id.to_string(),
            details,
        }
    }

    pub fn session_created(session_id: &SessionId) -> Self {
        Self::with_details(
            ConversationEventKind::SessionCreated,
            session_id.as_str(),
            Value::Null,
        )
    }

    pub fn session_cleared(session_id: &SessionId, existed: bool) -> Self {
        Self::with_details(
            ConversationEventKind::SessionCleared,
            session_id.as_str(),
            json!({ "existed": existed }),
        )
    }

    /// A turn that reached the transcript
    pub fn chat_committed(
        session_id: &SessionId,
        model: &str,
        system_change: SystemPromptChange,
        prompt: &str,
        response: &str,
    ) -> Self {
        Self::with_details(
            ConversationEventKind::ChatCommitted,
            session_id.as_str(),
            json!({
                "model": model,
                "system_change": system_change.as_str(),
                "prompt": prompt,
                "response": response,
            }),
        )
    }

    /// A turn that left the transcript untouched
    pub fn chat_discarded(session_id: &str, reason: &str) -> Self {
        Self::with_details(
            ConversationEventKind::ChatDiscarded,
            session_id,
            json!({ "reason": reason }),
        )
    }

    pub fn event_type(&self) -> &'static str {
        self.kind.as_str()
    }
}

/// Sink for [`ConversationEvent`]s.
///
/// Infallible and synchronous: an audit failure never changes what the
/// client sees.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Drops every event. Used when no conversation log is configured.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
