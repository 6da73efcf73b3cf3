//! signed_session - Signed session cookies and the verified session lifecycle
//!
//! A session cookie is a random identifier followed by its signature under a
//! server secret. Incoming cookies are length and signature checked into a
//! [`Cookie`]; the session payload loaded for it is promoted to a
//! [`VerifiedSession`] only when it holds sign-in info, an access token and an
//! unexpired expiry. Only a verified session re-issues a cookie.
//!
//! The secret is always passed explicitly. [`SESSION_SECRET`] and the other
//! configuration statics are for the HTTP layer.

mod access_token;
mod session;
mod utils;

#[cfg(test)]
mod test_utils;

pub use access_token::AccessToken;

pub use session::{
    COOKIE_VALUE_LENGTH, Cookie, ID_OCTETS, SESSION_COOKIE_NAME, SESSION_EXPIRY_PERIOD,
    SESSION_SECRET, SIGNATURE_LENGTH, SIGNATURE_START, Session, SessionData, SessionError,
    SessionKey, VerifiedSession, extract_session_id, extract_signature, generate_session_id,
    generate_signature, verify_session, verify_session_at,
};

pub use utils::{
    UtilError, base64_decode, base64_encode, base64url_decode, base64url_encode, gen_random_bytes,
    gen_random_string, sha256_base64url,
};
