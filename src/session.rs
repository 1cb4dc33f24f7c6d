//! Per-conversation session state and the session registry.

use crate::SessionId;
use crate::config::Config;
use crate::conversation::ChatCache;
use crate::emotion::EmotionVector;
use crate::error::{Result, SessionError};

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// State owned by a single conversation: its emotion vector and chat cache.
///
/// Sessions are fully independent; nothing is shared between two
/// conversations and there is no process-wide "current session".
#[derive(Debug)]
pub struct Session {
    pub emotions: EmotionVector,
    pub chat: ChatCache,
}

impl Session {
    /// Build a fresh session: calm emotions, empty cache.
    pub fn from_config(config: &Config) -> Self {
        Self {
            emotions: EmotionVector::new(&config.emotion.base_emotions),
            chat: ChatCache::with_capacity(config.conversation.cache_capacity),
        }
    }
}

/// Registry of live sessions keyed by conversation id.
///
/// Hands out `Arc<Mutex<Session>>` so the host serializes access per
/// session. The vector and cache are multi-step read-modify-write values
/// with no internal locking; the mutex is the serialization discipline.
#[derive(Debug, Clone)]
pub struct SessionStore {
    config: Config,
    sessions: Arc<Mutex<HashMap<SessionId, Arc<Mutex<Session>>>>>,
}

impl SessionStore {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Get the session for `id`, creating it on first use.
    pub async fn open(&self, id: &str) -> Arc<Mutex<Session>> {
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get(id) {
            return Arc::clone(session);
        }

        tracing::debug!(session_id = id, "opening new session");
        let session = Arc::new(Mutex::new(Session::from_config(&self.config)));
        sessions.insert(Arc::from(id), Arc::clone(&session));
        session
    }

    /// End a session, dropping its state.
    pub async fn end(&self, id: &str) -> Result<()> {
        let mut sessions = self.sessions.lock().await;
        if sessions.remove(id).is_none() {
            return Err(SessionError::NotFound { id: id.to_string() }.into());
        }

        tracing::debug!(session_id = id, "session ended");
        Ok(())
    }

    /// Rebuild a session in place: calm emotions, empty cache. Existing
    /// handles keep pointing at the same session.
    pub async fn reset(&self, id: &str) -> Result<()> {
        let session = {
            let sessions = self.sessions.lock().await;
            let Some(session) = sessions.get(id) else {
                return Err(SessionError::NotFound { id: id.to_string() }.into());
            };
            Arc::clone(session)
        };

        let mut guard = session.lock().await;
        *guard = Session::from_config(&self.config);
        tracing::debug!(session_id = id, "session reset");
        Ok(())
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[tokio::test]
    async fn open_reuses_the_same_session() {
        let store = SessionStore::new(Config::default());

        let first = store.open("discord:1234").await;
        let second = store.open("discord:1234").await;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let store = SessionStore::new(Config::default());

        let left = store.open("left").await;
        let right = store.open("right").await;

        {
            let mut left = left.lock().await;
            left.emotions
                .add_delta(&HashMap::from([("Anger".to_string(), 0.8)]));
            left.chat.push_user("alice", None, None, "grr");
        }

        let right = right.lock().await;
        assert!(right.emotions.get_strong_emotions().is_empty());
        assert!(right.chat.is_empty());
    }

    #[tokio::test]
    async fn end_removes_the_session_and_rejects_unknown_ids() {
        let store = SessionStore::new(Config::default());
        store.open("short-lived").await;

        store.end("short-lived").await.unwrap();
        assert!(store.is_empty().await);
        assert!(store.end("short-lived").await.is_err());
    }

    #[tokio::test]
    async fn reset_restores_the_calm_empty_state() {
        let store = SessionStore::new(Config::default());
        let session = store.open("resettable").await;

        {
            let mut session = session.lock().await;
            session
                .emotions
                .add_delta(&HashMap::from([("Fear".to_string(), 0.9)]));
            session.chat.push_assistant("boo");
        }

        store.reset("resettable").await.unwrap();

        let session = session.lock().await;
        assert!(session.emotions.get_strong_emotions().is_empty());
        assert!(session.chat.is_empty());
        assert_eq!(session.chat.turn(), 0);
    }
}
