//! System prompt reconciliation.
//!
//! A client may send a system prompt on any turn. The stored transcript keeps
//! a single system message at index 0, so each request has to decide whether
//! the supplied prompt is new, changed or already in place. The same decision
//! shapes two things:
//!
//! - the outgoing message list sent to the provider ([`build_outgoing`])
//! - the eventual commit ([`Transcript::commit_exchange`](super::entities::Transcript::commit_exchange))
//!
//! ```
//! use relay_domain::session::entities::Message;
//! use relay_domain::session::reconcile::{build_outgoing, SystemPromptChange};
//!
//! let history = vec![
//!     Message::system("A"),
//!     Message::user("q"),
//!     Message::assistant("a"),
//! ];
//! let out = build_outgoing(&history, Some("B"), "next");
//! assert_eq!(out.system_change, SystemPromptChange::Replaced);
//! assert_eq!(out.messages[0], Message::system("B"));
//! assert_eq!(out.messages.len(), 4);
//! ```

use super::entities::Message;

/// How a supplied system prompt relates to the stored one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemPromptChange {
    /// No (non-empty) system prompt in the request
    NotSupplied,
    /// Same content as the stored system message
    Unchanged,
    /// No stored system message; one will be prepended
    Inserted,
    /// Stored system message differs; it will be overwritten
    Replaced,
}

impl SystemPromptChange {
    /// Whether the stored transcript must change at commit time
    pub fn mutates_transcript(&self) -> bool {
        matches!(self, SystemPromptChange::Inserted | SystemPromptChange::Replaced)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SystemPromptChange::NotSupplied => "not_supplied",
            SystemPromptChange::Unchanged => "unchanged",
            SystemPromptChange::Inserted => "inserted",
            SystemPromptChange::Replaced => "replaced",
        }
    }
}

/// The exact list sent to the provider for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessages {
    pub messages: Vec<Message>,
    pub system_change: SystemPromptChange,
}

/// Trim a raw system prompt; blank means "not supplied".
pub fn normalize_system_prompt(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Assemble the provider message list from a history snapshot.
///
/// The snapshot itself is not modified; the returned
/// [`SystemPromptChange`] tells the caller what the commit will do.
pub fn build_outgoing(
    history: &[Message],
    system_prompt: Option<&str>,
    user_prompt: &str,
) -> OutgoingMessages {
    let mut messages = Vec::with_capacity(history.len() + 2);
    let stored = history.first().filter(|m| m.is_system());

    let system_change = match (system_prompt.filter(|s| !s.is_empty()), stored) {
        (None, _) => SystemPromptChange::NotSupplied,
        (Some(prompt), None) => {
            messages.push(Message::system(prompt));
            SystemPromptChange::Inserted
        }
        (Some(prompt), Some(existing)) if existing.content != prompt => {
            messages.push(Message::system(prompt));
            SystemPromptChange::Replaced
        }
        (Some(_), Some(_)) => SystemPromptChange::Unchanged,
    };

    let placed = system_change.mutates_transcript();
    messages.extend(
        history
            .iter()
            .filter(|m| !(placed && m.is_system()))
            .cloned(),
    );
    messages.push(Message::user(user_prompt));

    OutgoingMessages {
        messages,
        system_change,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::entities::{Role, Transcript};

    fn system_count(messages: &[Message]) -> usize {
        messages.iter().filter(|m| m.role == Role::System).count()
    }

    #[test]
    fn test_empty_history_without_system() {
        let out = build_outgoing(&[], None, "hi");
        assert_eq!(out.system_change, SystemPromptChange::NotSupplied);
        assert_eq!(out.messages, vec![Message::user("hi")]);
    }

    #[test]
    fn test_empty_history_with_system_prepends() {
        let out = build_outgoing(&[], Some("be terse"), "hi");
        assert_eq!(out.system_change, SystemPromptChange::Inserted);
        assert_eq!(
            out.messages,
            vec![Message::system("be terse"), Message::user("hi")]
        );
    }

    #[test]
    fn test_history_without_system_gets_prepended() {
        let history = vec![Message::user("q1"), Message::assistant("a1")];
        let out = build_outgoing(&history, Some("S"), "q2");
        assert_eq!(out.system_change, SystemPromptChange::Inserted);
        assert_eq!(
            out.messages,
            vec![
                Message::system("S"),
                Message::user("q1"),
                Message::assistant("a1"),
                Message::user("q2"),
            ]
        );
    }

    #[test]
    fn test_unchanged_system_is_replayed_once() {
        let history = vec![
            Message::system("S"),
            Message::user("q1"),
            Message::assistant("a1"),
        ];
        let out = build_outgoing(&history, Some("S"), "q2");
        assert_eq!(out.system_change, SystemPromptChange::Unchanged);
        assert_eq!(out.messages.len(), 4);
        assert_eq!(out.messages[0], Message::system("S"));
        assert_eq!(system_count(&out.messages), 1);
    }

    #[test]
    fn test_changed_system_replaces_stored_one() {
        let history = vec![
            Message::system("A"),
            Message::user("q1"),
            Message::assistant("a1"),
        ];
        let out = build_outgoing(&history, Some("B"), "q2");
        assert_eq!(out.system_change, SystemPromptChange::Replaced);
        assert_eq!(out.messages[0], Message::system("B"));
        assert_eq!(system_count(&out.messages), 1);
        assert_eq!(out.messages.last(), Some(&Message::user("q2")));
    }

    #[test]
    fn test_stored_system_kept_when_none_supplied() {
        let history = vec![Message::system("A"), Message::user("q1")];
        let out = build_outgoing(&history, None, "q2");
        assert_eq!(out.system_change, SystemPromptChange::NotSupplied);
        assert_eq!(out.messages[0], Message::system("A"));
        assert_eq!(out.messages.len(), 3);
    }

    #[test]
    fn test_outgoing_matches_committed_history() {
        // The list sent this turn equals the committed transcript minus the
        // assistant reply, whatever the system change was.
        let mut transcript = Transcript::new();
        transcript.commit_exchange(Some("A"), "q1", "a1");

        let out = build_outgoing(transcript.messages(), Some("B"), "q2");
        transcript.commit_exchange(Some("B"), "q2", "a2");

        let committed = transcript.messages();
        assert_eq!(&committed[..committed.len() - 1], out.messages.as_slice());
    }

    #[test]
    fn test_normalize_system_prompt() {
        assert_eq!(normalize_system_prompt(None), None);
        assert_eq!(normalize_system_prompt(Some("   ")), None);
        assert_eq!(
            normalize_system_prompt(Some("  be terse \n")),
            Some("be terse".to_string())
        );
    }
}
