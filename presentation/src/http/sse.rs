//! Server-sent event framing for chat streams.
//!
//! Each [`ChatEvent`] becomes one `data: <json>\n\n` frame:
//! `{text_chunk, is_final:false}`, `{full_response, is_final:true}` or
//! `{error, is_final:true}`.

use axum::response::sse::{Event, Sse};
use futures::{Stream, StreamExt};
use relay_application::ChatStream;
use relay_domain::ChatEvent;
use serde_json::{Value, json};
use std::convert::Infallible;

pub fn wire_payload(event: &ChatEvent) -> Value {
    match event {
        ChatEvent::Chunk(text) => json!({ "text_chunk": text, "is_final": false }),
        ChatEvent::Final(full) => json!({ "full_response": full, "is_final": true }),
        ChatEvent::Failed(message) => json!({ "error": message, "is_final": true }),
    }
}

/// Wrap a chat stream as an SSE response body. No keep-alive comments are sent.
pub fn event_stream(
    stream: ChatStream,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    Sse::new(stream.map(|event| Ok(Event::default().data(wire_payload(&event).to_string()))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shapes() {
        assert_eq!(
            wire_payload(&ChatEvent::Chunk("Hel".into())),
            json!({"text_chunk": "Hel", "is_final": false})
        );
        assert_eq!(
            wire_payload(&ChatEvent::Final("Hello".into())),
            json!({"full_response": "Hello", "is_final": true})
        );
        assert_eq!(
            wire_payload(&ChatEvent::Failed("Prompt is required".into())),
            json!({"error": "Prompt is required", "is_final": true})
        );
    }
}
