use headers::HeaderMapExt;
use http::header::{HeaderMap, SET_COOKIE};

use signed_session::{Cookie, SESSION_COOKIE_NAME, SessionError};

/// Raw value of the session cookie, if the request carries one.
pub fn session_cookie_from_headers(headers: &HeaderMap) -> Option<String> {
    let Some(cookies) = headers.typed_get::<headers::Cookie>() else {
        tracing::debug!("No cookie header found");
        return None;
    };

    let value = cookies.get(SESSION_COOKIE_NAME.as_str()).map(str::to_string);
    if value.is_none() {
        tracing::debug!(
            "No session cookie '{}' found in cookies",
            SESSION_COOKIE_NAME.as_str()
        );
    }
    value
}

/// Append a `Set-Cookie` for `cookie`, valid for `max_age` seconds.
pub fn set_session_cookie(
    headers: &mut HeaderMap,
    cookie: &Cookie,
    max_age: i64,
) -> Result<(), SessionError> {
    header_set_cookie(headers, SESSION_COOKIE_NAME.as_str(), &cookie.value(), max_age)
}

/// Append a `Set-Cookie` that expires the session cookie in the browser.
pub fn clear_session_cookie(headers: &mut HeaderMap) -> Result<(), SessionError> {
    header_set_cookie(headers, SESSION_COOKIE_NAME.as_str(), "value", -86400)
}

fn header_set_cookie(
    headers: &mut HeaderMap,
    name: &str,
    value: &str,
    max_age: i64,
) -> Result<(), SessionError> {
    let cookie =
        format!("{name}={value}; SameSite=Lax; Secure; HttpOnly; Path=/; Max-Age={max_age}");
    headers.append(
        SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| SessionError::Cookie("Failed to parse cookie".to_string()))?,
    );
    Ok(())
}
