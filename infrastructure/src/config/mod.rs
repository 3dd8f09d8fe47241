//! Configuration file loading for chat-relay
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables `RELAY_*` (`__` separates nested keys)
//! 2. `--config <path>` specified file
//! 3. Project root: `./relay.toml` or `./.relay.toml`
//! 4. Global: `$XDG_CONFIG_HOME/chat-relay/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileChatConfig, FileConfig, FileLoggingConfig, FileProviderConfig,
    FileServerConfig,
};
pub use loader::ConfigLoader;
