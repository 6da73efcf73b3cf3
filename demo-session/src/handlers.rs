use std::sync::Arc;

use askama::Template;
use axum::{
    Extension, Form,
    extract::{FromRef, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Duration;
use serde::Deserialize;

use signed_session_axum::{
    Cookie, IntoResponseError, SESSION_EXPIRY_PERIOD, SessionData, SessionError, SessionGuard,
    SignedIn, VerifiedSession, clear_session_cookie, session_cookie_from_headers,
    set_session_cookie,
};

use crate::store::MemoryStore;

#[derive(Clone, FromRef)]
pub(crate) struct AppState {
    pub(crate) guard: SessionGuard,
    pub(crate) store: Arc<MemoryStore>,
}

#[derive(Deserialize)]
pub(crate) struct SigninParams {
    referer: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct SigninForm {
    name: String,
    referer: Option<String>,
}

#[derive(Template)]
#[template(path = "index.html", escape = "html")]
struct IndexTemplate;

#[derive(Template)]
#[template(path = "signin.html", escape = "html")]
struct SigninTemplate<'a> {
    referer: &'a str,
}

#[derive(Template)]
#[template(path = "protected.html", escape = "html")]
struct ProtectedTemplate<'a> {
    name: &'a str,
    expires_at: String,
}

fn render(template: impl Template) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

pub(crate) async fn index() -> Response {
    render(IndexTemplate)
}

pub(crate) async fn signin_page(Query(params): Query<SigninParams>) -> Response {
    let referer = local_path(params.referer.as_deref());
    render(SigninTemplate { referer: &referer })
}

pub(crate) async fn signin(
    State(state): State<AppState>,
    Form(form): Form<SigninForm>,
) -> Result<Response, (StatusCode, String)> {
    let extra = SessionData::from([("DisplayName".to_string(), form.name.into())]);
    let expiry_period = expiry_period(*SESSION_EXPIRY_PERIOD).into_response_error()?;

    let verified = VerifiedSession::create_new_verified_session(
        state.guard.secret(),
        expiry_period,
        Some(extra),
    )
    .into_response_error()?;

    state.store.save(&verified).await.into_response_error()?;

    let cookie = verified.as_cookie(state.guard.secret()).into_response_error()?;
    let mut headers = HeaderMap::new();
    set_session_cookie(&mut headers, &cookie, expiry_period.num_seconds()).into_response_error()?;

    let target = local_path(form.referer.as_deref());
    tracing::info!("Signed in, redirecting to {}", target);
    Ok((headers, Redirect::to(&target)).into_response())
}

// Seconds to a period chrono can represent
fn expiry_period(seconds: u64) -> Result<Duration, SessionError> {
    i64::try_from(seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .ok_or(SessionError::ExpiryPeriodOutOfRange)
}

pub(crate) async fn signout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, (StatusCode, String)> {
    if let Some(cookie_string) = session_cookie_from_headers(&headers) {
        if let Ok(cookie) = Cookie::validate(state.guard.secret(), &cookie_string) {
            state.store.remove(cookie.session_id()).await;
        }
    }

    let mut response_headers = HeaderMap::new();
    clear_session_cookie(&mut response_headers).into_response_error()?;
    Ok((response_headers, Redirect::to("/")).into_response())
}

pub(crate) async fn protected(Extension(session): Extension<VerifiedSession>) -> Response {
    let name = session
        .get("DisplayName")
        .and_then(|v| v.as_str())
        .unwrap_or("anonymous");
    render(ProtectedTemplate {
        name,
        expires_at: session.expires_at().to_rfc3339(),
    })
}

pub(crate) async fn me(SignedIn(session): SignedIn) -> impl IntoResponse {
    session.to_json_string().into_response_error()
}

// Only same-site absolute paths are accepted as redirect targets
fn local_path(referer: Option<&str>) -> String {
    match referer {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => "/protected".to_string(),
    }
}
