//! Shared fixtures for the middleware and extractor tests

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use http::HeaderValue;

use signed_session::{SESSION_COOKIE_NAME, Session, SessionError, VerifiedSession};

use crate::source::SessionSource;

pub(crate) const SECRET: &str = "test-secret";

#[derive(Default)]
pub(crate) struct MockSource {
    sessions: HashMap<String, Session>,
}

impl MockSource {
    pub(crate) fn with(mut self, session_id: &str, session: Session) -> Self {
        self.sessions.insert(session_id.to_string(), session);
        self
    }
}

#[async_trait]
impl SessionSource for MockSource {
    async fn load_session(&self, session_id: &str) -> Result<Option<Session>, SessionError> {
        Ok(self.sessions.get(session_id).cloned())
    }
}

struct FailingSource;

#[async_trait]
impl SessionSource for FailingSource {
    async fn load_session(&self, _session_id: &str) -> Result<Option<Session>, SessionError> {
        Err(SessionError::Storage("backend unavailable".to_string()))
    }
}

pub(crate) fn failing_source() -> Arc<dyn SessionSource> {
    Arc::new(FailingSource)
}

/// Source holding one freshly created signed-in session.
pub(crate) fn signed_in_source(period: Duration) -> (Arc<dyn SessionSource>, VerifiedSession) {
    let verified = VerifiedSession::create_new_verified_session(SECRET, period, None).unwrap();
    let id = verified.session_id().unwrap().to_string();
    let source = MockSource::default().with(&id, Session::from_data(verified.unmarshall()));
    (Arc::new(source), verified)
}

pub(crate) fn cookie_header(value: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("{}={}", SESSION_COOKIE_NAME.as_str(), value)).unwrap()
}
