//! Application-level configuration.
//!
//! - [`ChatDefaults`]: request defaults and stream buffering

pub mod chat_defaults;

pub use chat_defaults::ChatDefaults;
