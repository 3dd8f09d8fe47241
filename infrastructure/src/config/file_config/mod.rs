//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; conversion into application types happens
//! through the `to_*` helpers on each section.

mod chat;
mod logging;
mod provider;
mod server;

pub use chat::FileChatConfig;
pub use logging::FileLoggingConfig;
pub use provider::FileProviderConfig;
pub use server::FileServerConfig;

use relay_domain::TEMPERATURE_RANGE;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    #[error("server.port cannot be 0")]
    InvalidPort,

    #[error("chat.default_temperature must be between 0.0 and 2.0 (got {0})")]
    InvalidTemperature(f32),

    #[error("chat.default_model cannot be empty")]
    EmptyModelName,

    #[error("provider.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("chat.stream_buffer cannot be 0")]
    InvalidStreamBuffer,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// HTTP listener settings
    pub server: FileServerConfig,
    /// Upstream LLM provider settings
    pub provider: FileProviderConfig,
    /// Request defaults
    pub chat: FileChatConfig,
    /// Structured conversation log
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        let temperature = self.chat.default_temperature;
        if !TEMPERATURE_RANGE.contains(&temperature) {
            return Err(ConfigValidationError::InvalidTemperature(temperature));
        }

        if self.chat.default_model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }

        if let Some(0) = self.provider.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.chat.stream_buffer == 0 {
            return Err(ConfigValidationError::InvalidStreamBuffer);
        }

        Ok(())
    }

    /// Copy safe to print (inline secrets masked)
    pub fn redacted(&self) -> Self {
        Self {
            provider: self.provider.redacted(),
            ..self.clone()
        }
    }
}
