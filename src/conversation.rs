//! Conversation history management.

pub mod cache;

pub use cache::{ChatCache, ChatEntry, Role};
