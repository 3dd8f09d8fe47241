//! Prompt value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// The user's turn for a chat request (Value Object)
///
/// Always holds non-blank text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    content: String,
}

impl Prompt {
    /// Create a prompt, rejecting empty or whitespace-only content
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::MissingPrompt)
        } else {
            Ok(Self { content })
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_keeps_content_verbatim() {
        let p = Prompt::try_new("  hi there ").unwrap();
        assert_eq!(p.content(), "  hi there ");
    }

    #[test]
    fn test_blank_prompt_rejected() {
        assert_eq!(Prompt::try_new(""), Err(DomainError::MissingPrompt));
        assert_eq!(Prompt::try_new(" \n\t"), Err(DomainError::MissingPrompt));
    }
}
