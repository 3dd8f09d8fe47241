//! Chat session domain.
//!
//! - [`entities::Transcript`]: ordered history owned by one session
//! - [`entities::Message`]: a single role-tagged turn
//! - [`reconcile`]: system prompt reconciliation across turns
//! - [`stream`]: provider and client stream events

pub mod entities;
pub mod reconcile;
pub mod stream;
