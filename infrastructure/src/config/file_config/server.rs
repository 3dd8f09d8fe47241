//! Server configuration from TOML (`[server]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Bind address (default: "0.0.0.0")
    pub host: String,
    /// Listen port (default: 5000)
    pub port: u16,
    /// Directory holding `index.html` for `GET /`
    pub static_dir: Option<PathBuf>,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            static_dir: None,
        }
    }
}

impl FileServerConfig {
    /// `host:port` string suitable for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
