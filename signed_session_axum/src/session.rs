use axum::{
    extract::{FromRef, FromRequestParts},
    response::{IntoResponse, Redirect, Response},
};
use http::{Method, StatusCode, Uri, request::Parts};

use signed_session::VerifiedSession;

use super::middleware::{SessionGuard, signin_location};

pub(crate) struct AuthRedirect {
    method: Method,
    uri: Uri,
}

impl AuthRedirect {
    fn new(method: Method, uri: Uri) -> Self {
        Self { method, uri }
    }
}

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        if self.method == Method::GET {
            let location = signin_location(&self.uri);
            tracing::debug!("Redirecting to {}", location);
            Redirect::temporary(&location).into_response()
        } else {
            tracing::debug!("Unauthorized");
            (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
    }
}

/// The verified session of the current request, available as an Axum extractor
///
/// Behind one of the guard middlewares this reads the session the middleware
/// already verified. Elsewhere it authenticates the request itself using the
/// [`SessionGuard`] in the router state.
///
/// # Example
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use signed_session_axum::{SessionGuard, SignedIn};
///
/// async fn protected_handler(SignedIn(session): SignedIn) -> String {
///     format!("Session expires at {}", session.expires_at())
/// }
///
/// fn app(guard: SessionGuard) -> Router {
///     Router::new()
///         .route("/protected", get(protected_handler))
///         .with_state(guard)
/// }
/// ```
#[derive(Clone, Debug)]
pub struct SignedIn(pub VerifiedSession);

impl<S> FromRequestParts<S> for SignedIn
where
    S: Send + Sync,
    SessionGuard: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(verified) = parts.extensions.get::<VerifiedSession>() {
            return Ok(SignedIn(verified.clone()));
        }

        let guard = SessionGuard::from_ref(state);
        match guard.authenticate(&parts.headers).await {
            Ok(verified) => Ok(SignedIn(verified)),
            Err(err) if err.requires_sign_in() => {
                tracing::debug!("Not signed in: {}", err);
                Err(AuthRedirect::new(parts.method.clone(), parts.uri.clone()).into_response())
            }
            Err(err) => {
                tracing::error!("Session check failed: {}", err);
                Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response())
            }
        }
    }
}
