// src/services/session_manager.rs
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;
use uuid::Uuid;

use super::conversation::{Conversation, ConversationView};

#[derive(Clone, Debug)]
pub struct Session {
    pub id: String,
    pub conversation: Conversation,
    pub last_active: Instant,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), conversation: Conversation::new(), last_active: Instant::now() }
    }
}

#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionManager {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    // Create a fresh session and return its id.
    pub async fn create_session(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let session = Session::new(id.clone());

        let mut guard = self.inner.write().await;
        guard.insert(id.clone(), session);
        id
    }

    // Ensure there's a session with this id.
    pub async fn ensure_session(&self, id: &str) -> String {
        {
            let guard = self.inner.read().await;
            if guard.contains_key(id) {
                return id.to_string();
            }
        }
        let mut guard = self.inner.write().await;
        guard.entry(id.to_string()).or_insert_with(|| Session::new(id));
        id.to_string()
    }

    /// Submit `text` to the session's conversation, creating the session if it
    /// is missing (e.g. purged since the caller resolved it).
    ///
    /// Returns the prompt to send when the submission was accepted, `None` when
    /// the text is blank or a request is already in flight. The lock is
    /// released before returning so the caller never holds it across the
    /// completion call.
    pub async fn begin_exchange(&self, session_id: &str, text: &str) -> Option<String> {
        let mut guard = self.inner.write().await;
        let session = guard
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(session_id));
        session.last_active = Instant::now();
        session.conversation.submit(text)
    }

    /// Deliver the answer for the outstanding request. Returns false when the
    /// session is gone or had nothing pending.
    pub async fn settle_exchange(&self, session_id: &str, reply: impl Into<String>) -> bool {
        let mut guard = self.inner.write().await;
        let Some(session) = guard.get_mut(session_id) else {
            return false;
        };
        session.last_active = Instant::now();
        session.conversation.settle(reply)
    }

    pub async fn view(&self, session_id: &str) -> Option<ConversationView> {
        let guard = self.inner.read().await;
        guard.get(session_id).map(|s| s.conversation.view())
    }

    /// Remove a session by id
    pub async fn remove_session(&self, session_id: &str) -> bool {
        let mut guard = self.inner.write().await;
        guard.remove(session_id).is_some()
    }

    /// Remove sessions idle longer than ttl. Sessions waiting on a reply are
    /// kept. Returns number removed.
    pub async fn purge_expired(&self) -> usize {
        let mut guard = self.inner.write().await;
        let now = Instant::now();
        let before = guard.len();
        guard.retain(|_, s| s.conversation.is_pending() || now.duration_since(s.last_active) < self.ttl);
        before - guard.len()
    }

    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn list_session_ids(&self) -> Vec<String> {
        let guard = self.inner.read().await;
        guard.keys().cloned().collect()
    }

    /// Periodically drop idle sessions until the runtime shuts down.
    pub fn spawn_purger(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        let sessions = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let removed = sessions.purge_expired().await;
                if removed > 0 {
                    tracing::debug!(removed, "purged idle chat sessions");
                }
            }
        })
    }
}
