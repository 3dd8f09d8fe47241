//! Provider configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat completion provider (Groq by default).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Environment variable name for the API key (default: "GROQ_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Per-request timeout. No timeout when unset.
    pub timeout_seconds: Option<u64>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
            api_key: None,
            timeout_seconds: None,
        }
    }
}

impl FileProviderConfig {
    /// Inline key first, then the configured environment variable.
    ///
    /// Blank values count as missing.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }

    /// Copy with the inline key masked, for printing.
    pub fn redacted(&self) -> Self {
        Self {
            api_key: self.api_key.as_ref().map(|_| "<redacted>".to_string()),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_key_wins() {
        let config = FileProviderConfig {
            api_key: Some("inline".into()),
            api_key_env: "RELAY_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key(), Some("inline".into()));
    }

    #[test]
    fn test_missing_key_resolves_to_none() {
        let config = FileProviderConfig {
            api_key_env: "RELAY_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key(), None);
    }

    #[test]
    fn test_blank_inline_key_is_missing() {
        let config = FileProviderConfig {
            api_key: Some("  ".into()),
            api_key_env: "RELAY_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key(), None);
    }

    #[test]
    fn test_redacted_hides_inline_key() {
        let config = FileProviderConfig {
            api_key: Some("gsk_secret".into()),
            ..Default::default()
        };
        let shown = config.redacted();
        assert_eq!(shown.api_key.as_deref(), Some("<redacted>"));
        assert_eq!(shown.base_url, config.base_url);
    }
}
