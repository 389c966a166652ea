use crate::core::WELCOME_REPLY;
use crate::models::ChatMessage;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// In-memory store for session-scoped chat transcripts.
///
/// Transcripts are ordered, append-only, and expire after a period of
/// inactivity; nothing is ever persisted. The first touch of a session
/// seeds the assistant's welcome message, and closing the widget clears
/// the transcript entirely.
pub struct SessionStore {
    sessions: moka::future::Cache<String, Arc<Mutex<Vec<ChatMessage>>>>,
}

impl SessionStore {
    pub fn new(capacity: u64, idle_ttl_secs: u64) -> Self {
        let sessions = moka::future::CacheBuilder::new(capacity)
            .time_to_idle(Duration::from_secs(idle_ttl_secs))
            .build();

        Self { sessions }
    }

    async fn session(&self, session_id: &str) -> Arc<Mutex<Vec<ChatMessage>>> {
        self.sessions
            .get_with(session_id.to_string(), async {
                Arc::new(Mutex::new(vec![ChatMessage::bot(WELCOME_REPLY)]))
            })
            .await
    }

    /// Append one message to a session transcript
    pub async fn append(&self, session_id: &str, message: ChatMessage) {
        let session = self.session(session_id).await;
        session.lock().await.push(message);
    }

    /// Snapshot of a session transcript, oldest first
    pub async fn history(&self, session_id: &str) -> Vec<ChatMessage> {
        let session = self.session(session_id).await;
        let messages = session.lock().await;
        messages.clone()
    }

    /// Drop a session transcript (widget closed)
    pub async fn clear(&self, session_id: &str) {
        self.sessions.invalidate(session_id).await;
    }
}
