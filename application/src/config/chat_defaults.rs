//! Chat defaults: values applied when a request leaves a field out.

use relay_domain::Model;
use serde::{Deserialize, Serialize};

/// Request defaults and streaming parameters for [`StreamChatUseCase`].
///
/// [`StreamChatUseCase`]: crate::use_cases::stream_chat::StreamChatUseCase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatDefaults {
    /// Model used when the request has no `model_id`.
    pub model: Model,
    /// Temperature used when the request has no `temperature`.
    pub temperature: f32,
    /// Capacity of the per-request output channel.
    pub stream_buffer: usize,
}

impl Default for ChatDefaults {
    fn default() -> Self {
        Self {
            model: Model::default(),
            temperature: 0.7,
            stream_buffer: 64,
        }
    }
}

impl ChatDefaults {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_stream_buffer(mut self, capacity: usize) -> Self {
        self.stream_buffer = capacity.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_provider_defaults() {
        let d = ChatDefaults::default();
        assert_eq!(d.model.as_str(), "llama3-8b-8192");
        assert!((d.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(d.stream_buffer, 64);
    }

    #[test]
    fn test_stream_buffer_never_zero() {
        let d = ChatDefaults::default().with_stream_buffer(0);
        assert_eq!(d.stream_buffer, 1);
    }
}
