//! Core domain concepts shared across subdomains.
//!
//! - [`model::Model`]: provider model identifiers
//! - [`prompt::Prompt`]: a validated user prompt
//! - [`temperature::check_temperature`]: sampling temperature bounds
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod prompt;
pub mod temperature;
