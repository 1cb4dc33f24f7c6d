//! Moodbot: per-conversation emotion state and chat history for a chat assistant.
//!
//! The crate is pure in-process state. Platform event loops and model
//! backends live in the host, which consumes this API and nothing else.

pub mod config;
pub mod conversation;
pub mod emotion;
pub mod error;
pub mod session;

pub use error::{Error, Result};

use std::sync::Arc;

/// Session identifier type. One session per live conversation.
pub type SessionId = Arc<str>;
