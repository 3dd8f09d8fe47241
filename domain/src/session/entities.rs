//! Session domain entities

use super::reconcile::SystemPromptChange;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message in a conversation (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn is_system(&self) -> bool {
        self.role == Role::System
    }
}

/// Opaque identifier of a chat session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap a caller-supplied id. The empty string is not a session.
    pub fn try_new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.is_empty() {
            Err(DomainError::MissingSessionId)
        } else {
            Ok(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered history of a session (Entity)
///
/// Invariant: at most one [`Role::System`] message, and only at index 0.
/// Every other message is append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Insert or replace the system message at position 0.
    pub fn upsert_system(&mut self, content: &str) -> SystemPromptChange {
        match self.messages.first_mut() {
            Some(first) if first.is_system() => {
                if first.content == content {
                    SystemPromptChange::Unchanged
                } else {
                    first.content = content.to_string();
                    SystemPromptChange::Replaced
                }
            }
            _ => {
                self.messages.insert(0, Message::system(content));
                SystemPromptChange::Inserted
            }
        }
    }

    /// Apply one finished turn: system upsert (if supplied), then user, then assistant.
    ///
    /// Non-system roles are forced so a caller cannot smuggle a second system
    /// message into the history.
    pub fn commit_exchange(
        &mut self,
        system_prompt: Option<&str>,
        user: impl Into<String>,
        assistant: impl Into<String>,
    ) -> SystemPromptChange {
        let change = match system_prompt {
            Some(prompt) if !prompt.is_empty() => self.upsert_system(prompt),
            _ => SystemPromptChange::NotSupplied,
        };
        self.messages.push(Message::user(user));
        self.messages.push(Message::assistant(assistant));
        change
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::assistant("ok")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"ok"}"#);
    }

    #[test]
    fn test_empty_session_id_rejected() {
        assert_eq!(SessionId::try_new(""), Err(DomainError::MissingSessionId));
        assert_eq!(SessionId::try_new("abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn test_commit_without_system_appends_pair() {
        let mut t = Transcript::new();
        let change = t.commit_exchange(None, "hi", "hello");
        assert_eq!(change, SystemPromptChange::NotSupplied);
        assert_eq!(t.messages(), &[Message::user("hi"), Message::assistant("hello")]);
        assert!(!t.messages()[0].is_system());
    }

    #[test]
    fn test_commit_inserts_system_once() {
        let mut t = Transcript::new();
        assert_eq!(
            t.commit_exchange(Some("be terse"), "hi", "Hello"),
            SystemPromptChange::Inserted
        );
        assert_eq!(
            t.commit_exchange(Some("be terse"), "again", "Hi"),
            SystemPromptChange::Unchanged
        );
        assert_eq!(t.messages().len(), 5);
        assert_eq!(t.messages().iter().filter(|m| m.is_system()).count(), 1);
        assert_eq!(t.messages()[0], Message::system("be terse"));
    }

    #[test]
    fn test_commit_replaces_system_in_place() {
        let mut t = Transcript::new();
        t.commit_exchange(Some("A"), "q1", "a1");
        let change = t.commit_exchange(Some("B"), "q2", "a2");
        assert_eq!(change, SystemPromptChange::Replaced);
        assert_eq!(t.messages()[0], Message::system("B"));
        assert_eq!(t.messages().len(), 5);
    }

    #[test]
    fn test_system_inserted_ahead_of_existing_history() {
        let mut t = Transcript::new();
        t.commit_exchange(None, "q1", "a1");
        t.commit_exchange(Some("late"), "q2", "a2");
        assert_eq!(t.messages()[0], Message::system("late"));
        assert_eq!(t.messages()[1], Message::user("q1"));
        assert_eq!(t.messages().len(), 5);
    }

    #[test]
    fn test_empty_system_prompt_is_not_supplied() {
        let mut t = Transcript::new();
        assert_eq!(
            t.commit_exchange(Some(""), "q", "a"),
            SystemPromptChange::NotSupplied
        );
        assert_eq!(t.messages().len(), 2);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut t = Transcript::new();
        t.commit_exchange(Some("s"), "q", "a");
        t.clear();
        let once = t.clone();
        t.clear();
        assert_eq!(t, once);
        assert!(t.is_empty());
    }
}
