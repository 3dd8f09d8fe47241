//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// The display strings for the validation variants are part of the wire
/// contract: they are forwarded verbatim in terminal stream events.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("session_id is required")]
    MissingSessionId,

    #[error("Prompt is required")]
    MissingPrompt,

    #[error("temperature must be between 0.0 and 2.0 (got {0})")]
    InvalidTemperature(String),
}

impl DomainError {
    /// Check if this error comes from rejecting caller input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::MissingSessionId
                | DomainError::MissingPrompt
                | DomainError::InvalidTemperature(_)
        )
    }
}
