//! signed_session_axum - Axum integration for signed-session
//!
//! Guards routes by validating the session cookie, loading the session through
//! a [`SessionSource`] and verifying it. Which roles may reach which routes is
//! left to the application.

mod config;
mod cookie;
mod error;
mod middleware;
mod session;
mod source;

#[cfg(test)]
mod test_utils;

pub use config::{REFERER_PARAM, SESSION_SIGNIN_URL};
pub use cookie::{clear_session_cookie, session_cookie_from_headers, set_session_cookie};
pub use error::IntoResponseError;
pub use middleware::{SessionGuard, require_session_or_401, require_session_or_redirect};
pub use session::SignedIn;
pub use source::SessionSource;

// Re-export the core types handlers work with
pub use signed_session::{
    Cookie, SESSION_COOKIE_NAME, SESSION_EXPIRY_PERIOD, SESSION_SECRET, Session, SessionData,
    SessionError, VerifiedSession,
};
