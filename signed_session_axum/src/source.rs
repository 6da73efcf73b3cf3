use async_trait::async_trait;

use signed_session::{Session, SessionError};

/// Where the application keeps session payloads.
///
/// Lookups are keyed by the identifier of an already validated cookie. An
/// unknown identifier is `Ok(None)`, which the guard treats as an empty
/// session (and therefore as "not signed in").
#[async_trait]
pub trait SessionSource: Send + Sync + 'static {
    async fn load_session(&self, session_id: &str) -> Result<Option<Session>, SessionError>;
}
