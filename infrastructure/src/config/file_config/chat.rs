//! Chat defaults from TOML (`[chat]` section)

use relay_application::ChatDefaults;
use relay_domain::Model;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Model id used when a request has no `model_id`
    pub default_model: String,
    /// Temperature used when a request has no `temperature`
    pub default_temperature: f32,
    /// Capacity of each request's output channel
    pub stream_buffer: usize,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        let defaults = ChatDefaults::default();
        Self {
            default_model: defaults.model.to_string(),
            default_temperature: defaults.temperature,
            stream_buffer: defaults.stream_buffer,
        }
    }
}

impl FileChatConfig {
    pub fn to_chat_defaults(&self) -> ChatDefaults {
        ChatDefaults::default()
            .with_model(Model::from(self.default_model.trim()))
            .with_temperature(self.default_temperature)
            .with_stream_buffer(self.stream_buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_model_maps_to_variant() {
        let config = FileChatConfig {
            default_model: "mixtral-8x7b-32768".into(),
            ..Default::default()
        };
        assert_eq!(config.to_chat_defaults().model, Model::Mixtral8x7b);
    }

    #[test]
    fn test_unknown_model_passes_through() {
        let config = FileChatConfig {
            default_model: "some-new-model".into(),
            default_temperature: 0.2,
            stream_buffer: 8,
        };
        let defaults = config.to_chat_defaults();
        assert_eq!(defaults.model, Model::Custom("some-new-model".into()));
        assert_eq!(defaults.stream_buffer, 8);
    }
}
