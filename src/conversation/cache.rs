//! Rolling per-session chat cache.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;

/// Speaker role for a cached chat entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// A single cached conversation turn.
///
/// Entries are structured rather than pre-rendered prompt text; how they
/// become prompt lines is the host's concern.
#[derive(Debug, Clone, Serialize)]
pub struct ChatEntry {
    pub role: Role,
    /// Platform account name. `None` for assistant entries.
    pub author: Option<String>,
    /// Display name, when the platform distinguishes it from the account name.
    pub nickname: Option<String>,
    /// Author of the message this one replies to, if any.
    pub reply_to: Option<String>,
    pub content: String,
    /// Monotonic turn number within the session, starting at 1.
    pub turn: u64,
    pub timestamp: DateTime<Utc>,
}

/// Bounded ring of recent conversation entries.
///
/// Pushing beyond capacity evicts the oldest entry. The turn counter keeps
/// counting across evictions and resets only on [`ChatCache::clear`].
#[derive(Debug, Clone)]
pub struct ChatCache {
    entries: VecDeque<ChatEntry>,
    capacity: usize,
    turn: u64,
}

impl ChatCache {
    /// Default cache depth.
    pub const DEFAULT_CAPACITY: usize = 40;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a cache holding at most `capacity` entries (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            turn: 0,
        }
    }

    /// Append a user entry, stamping it with the next turn number.
    pub fn push_user(
        &mut self,
        author: impl Into<String>,
        nickname: Option<&str>,
        reply_to: Option<&str>,
        content: impl Into<String>,
    ) {
        let entry = ChatEntry {
            role: Role::User,
            author: Some(author.into()),
            nickname: nickname.map(String::from),
            reply_to: reply_to.map(String::from),
            content: content.into(),
            turn: self.next_turn(),
            timestamp: Utc::now(),
        };
        self.push(entry);
    }

    /// Append an assistant entry.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        let entry = ChatEntry {
            role: Role::Assistant,
            author: None,
            nickname: None,
            reply_to: None,
            content: content.into(),
            turn: self.next_turn(),
            timestamp: Utc::now(),
        };
        self.push(entry);
    }

    fn next_turn(&mut self) -> u64 {
        self.turn += 1;
        self.turn
    }

    fn push(&mut self, entry: ChatEntry) {
        if self.entries.len() == self.capacity
            && let Some(evicted) = self.entries.pop_front()
        {
            tracing::debug!(turn = evicted.turn, "evicting oldest chat entry");
        }
        self.entries.push_back(entry);
    }

    /// Entries oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &ChatEntry> {
        self.entries.iter()
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &ChatEntry> {
        self.entries
            .iter()
            .skip(self.entries.len().saturating_sub(n))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Last issued turn number. 0 before the first entry.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Drop all entries and reset the turn counter, as on session reset.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.turn = 0;
    }
}

impl Default for ChatCache {
    fn default() -> Self {
        Self::new()
    }
}
