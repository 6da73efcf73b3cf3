use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use signed_session_axum::{Session, SessionError, SessionSource};

/// Session payloads kept as serialized JSON, keyed by session id
#[derive(Default)]
pub(crate) struct MemoryStore {
    sessions: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub(crate) async fn save(&self, session: &Session) -> Result<(), SessionError> {
        let Some(id) = session.session_id() else {
            return Err(SessionError::Storage("Session has no id".to_string()));
        };
        let payload = session.to_json_string()?;
        self.sessions.lock().await.insert(id.to_string(), payload);
        Ok(())
    }

    pub(crate) async fn remove(&self, session_id: &str) {
        self.sessions.lock().await.remove(session_id);
    }
}

#[async_trait]
impl SessionSource for MemoryStore {
    async fn load_session(&self, session_id: &str) -> Result<Option<Session>, SessionError> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(session_id)
            .map(|payload| Session::from_json_str(payload))
            .transpose()
    }
}
