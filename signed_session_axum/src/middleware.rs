use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use http::{HeaderMap, Method, Uri};

use signed_session::{Cookie, SESSION_SECRET, SessionError, VerifiedSession};

use super::config::{REFERER_PARAM, SESSION_SIGNIN_URL};
use super::cookie::session_cookie_from_headers;
use super::source::SessionSource;

/// Middleware state: the cookie secret and the session source.
#[derive(Clone)]
pub struct SessionGuard {
    secret: Arc<str>,
    source: Arc<dyn SessionSource>,
}

impl SessionGuard {
    pub fn new(secret: impl Into<Arc<str>>, source: Arc<dyn SessionSource>) -> Self {
        Self {
            secret: secret.into(),
            source,
        }
    }

    /// Guard using the `SESSION_SECRET` environment variable.
    pub fn from_env(source: Arc<dyn SessionSource>) -> Self {
        Self::new(SESSION_SECRET.as_str(), source)
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Validate the session cookie in `headers`, load its payload and verify it.
    ///
    /// A missing cookie fails the length check; an unknown session id is
    /// verified as an empty session.
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<VerifiedSession, SessionError> {
        let cookie_string = session_cookie_from_headers(headers).unwrap_or_default();
        let cookie = Cookie::validate(&self.secret, &cookie_string)?;

        let session = self
            .source
            .load_session(cookie.session_id())
            .await?
            .unwrap_or_default();

        session.verify()
    }
}

// Map authentication failures to a response
fn handle_auth_error(err: SessionError, method: &Method, uri: &Uri, redirect: bool) -> Response {
    if !err.requires_sign_in() {
        tracing::error!("Session check failed: {}", err);
        return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
    }

    if err.is_tampering() {
        tracing::warn!("Rejected session cookie with a bad signature");
    } else {
        tracing::debug!("Not signed in: {}", err);
    }

    if redirect && *method == Method::GET {
        let location = signin_location(uri);
        tracing::debug!("Redirecting to {}", location);
        Redirect::temporary(&location).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
    }
}

/// Sign-in URL carrying the requested path and query as the referer.
pub(crate) fn signin_location(uri: &Uri) -> String {
    let referer = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let separator = if SESSION_SIGNIN_URL.contains('?') {
        '&'
    } else {
        '?'
    };
    format!(
        "{}{}{}={}",
        SESSION_SIGNIN_URL.as_str(),
        separator,
        REFERER_PARAM,
        urlencoding::encode(referer)
    )
}

/// Reject unauthenticated requests with 401.
///
/// On success the [`VerifiedSession`] is stored in the request extensions.
pub async fn require_session_or_401(
    State(guard): State<SessionGuard>,
    mut req: Request,
    next: Next,
) -> Response {
    match guard.authenticate(req.headers()).await {
        Ok(verified) => {
            req.extensions_mut().insert(verified);
            next.run(req).await
        }
        Err(err) => handle_auth_error(err, req.method(), req.uri(), false),
    }
}

/// Like [`require_session_or_401`], but GET requests are redirected to the
/// sign-in page with the requested path as `referer`.
pub async fn require_session_or_redirect(
    State(guard): State<SessionGuard>,
    mut req: Request,
    next: Next,
) -> Response {
    match guard.authenticate(req.headers()).await {
        Ok(verified) => {
            req.extensions_mut().insert(verified);
            next.run(req).await
        }
        Err(err) => handle_auth_error(err, req.method(), req.uri(), true),
    }
}
