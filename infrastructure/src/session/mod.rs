//! Session storage adapters

mod memory_store;

pub use memory_store::InMemorySessionStore;
