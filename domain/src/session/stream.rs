//! Streaming events for chat exchanges.
//!
//! Two event types cross layer boundaries:
//!
//! - [`StreamEvent`]: what a provider adapter emits while generating
//! - [`ChatEvent`]: what the relay forwards to its caller

/// An event in a streaming provider response.
///
/// Bridges infrastructure-level streaming (SSE chunks from the provider)
/// to the application layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A text chunk from the model.
    Delta(String),
    /// The complete response text (signals stream end).
    Completed(String),
    /// An error that occurred during streaming.
    Error(String),
}

impl StreamEvent {
    /// Returns the text content if this is a Delta or Completed event.
    pub fn text(&self) -> Option<&str> {
        match self {
            StreamEvent::Delta(s) | StreamEvent::Completed(s) => Some(s),
            StreamEvent::Error(_) => None,
        }
    }

    /// Returns true if this event signals the end of the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Completed(_) | StreamEvent::Error(_))
    }
}

/// An event emitted to the client for one chat request.
///
/// Every request ends with exactly one final event ([`ChatEvent::Final`]
/// or [`ChatEvent::Failed`]) unless the client went away first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Incremental text (non-final).
    Chunk(String),
    /// The full accumulated response; the exchange has been committed.
    Final(String),
    /// The request failed; nothing was committed.
    Failed(String),
}

impl ChatEvent {
    pub fn is_final(&self) -> bool {
        !matches!(self, ChatEvent::Chunk(_))
    }
}
