//! Session identifier generation and cookie signatures
//!
//! A cookie value is the identifier immediately followed by its signature. There
//! is no delimiter: the split happens at the fixed offset `SIGNATURE_START`.

use ring::hmac;
use subtle::ConstantTimeEq;

use crate::session::config::{ID_OCTETS, SIGNATURE_START};
use crate::session::errors::SessionError;
use crate::utils::{base64url_encode, gen_random_string};

/// Fresh identifier of `ID_OCTETS` random bytes from the system CSPRNG.
pub fn generate_session_id() -> Result<String, SessionError> {
    gen_random_string(ID_OCTETS).map_err(|e| {
        tracing::error!("Failed to generate session id: {}", e);
        SessionError::from(e)
    })
}

/// HMAC-SHA256 of the identifier keyed by `secret`, base64url without padding.
///
/// Accepts a bare identifier or a whole cookie value; only the first
/// `SIGNATURE_START` bytes are signed.
pub fn generate_signature(id: &str, secret: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    let tag = hmac::sign(&key, extract_session_id(id).as_bytes());
    base64url_encode(tag.as_ref())
}

/// First `SIGNATURE_START` bytes of a cookie value.
///
/// Inputs that are too short, or where the offset splits a character, yield the
/// whole input and an empty string respectively, so callers checking lengths
/// first never observe a panic.
pub fn extract_session_id(cookie_value: &str) -> &str {
    match cookie_value.split_at_checked(SIGNATURE_START) {
        Some((id, _)) => id,
        None if cookie_value.len() < SIGNATURE_START => cookie_value,
        None => "",
    }
}

/// Everything after `SIGNATURE_START`.
pub fn extract_signature(cookie_value: &str) -> &str {
    cookie_value
        .split_at_checked(SIGNATURE_START)
        .map(|(_, sig)| sig)
        .unwrap_or_default()
}

pub(crate) fn signatures_match(expected: &str, actual: &str) -> bool {
    expected.as_bytes().ct_eq(actual.as_bytes()).into()
}
