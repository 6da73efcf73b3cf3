use std::fmt;

use crate::session::config::COOKIE_VALUE_LENGTH;
use crate::session::errors::SessionError;

use super::session::Session;
use super::signing::{
    extract_session_id, extract_signature, generate_session_id, generate_signature,
    signatures_match,
};

/// Session identifier paired with its signature.
///
/// Both fields are non-empty. The wire form, [`Cookie::value`], is the two
/// concatenated without a delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    session_id: String,
    signature: String,
}

impl Cookie {
    fn new(session_id: String, signature: String) -> Result<Self, SessionError> {
        if session_id.is_empty() {
            return Err(SessionError::Cookie("Session ID is required".to_string()));
        }
        if signature.is_empty() {
            return Err(SessionError::Cookie("Signature is required".to_string()));
        }
        Ok(Self {
            session_id,
            signature,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn value(&self) -> String {
        self.to_string()
    }

    /// Mint a cookie for a brand new session identifier.
    ///
    /// Fails only when the secret is empty or the entropy source fails.
    pub fn create(secret: &str) -> Result<Self, SessionError> {
        if secret.is_empty() {
            return Err(SessionError::SessionSecretNotSet);
        }
        let session_id = generate_session_id()?;
        let signature = generate_signature(&session_id, secret);
        Self::new(session_id, signature)
    }

    /// Re-sign the `Id` stored in an existing session.
    pub fn representation_of(session: &Session, secret: &str) -> Result<Self, SessionError> {
        if secret.is_empty() {
            return Err(SessionError::SessionSecretNotSet);
        }
        let id = session.session_id().unwrap_or_default();
        Self::new(id.to_string(), generate_signature(id, secret))
    }

    /// Validator for incoming cookie strings, bound to `secret`.
    pub fn validate_cookie_string(
        secret: &str,
    ) -> impl Fn(&str) -> Result<Cookie, SessionError> + '_ {
        move |cookie_string: &str| Self::validate(secret, cookie_string)
    }

    /// Length check, then signature check. The first failure is returned.
    pub fn validate(secret: &str, cookie_string: &str) -> Result<Cookie, SessionError> {
        validate_cookie_length(cookie_string)?;
        let (session_id, signature) = validate_cookie_signature(secret, cookie_string)?;
        Self::new(session_id.to_string(), signature.to_string())
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.session_id, self.signature)
    }
}

fn validate_cookie_length(cookie_string: &str) -> Result<(), SessionError> {
    if cookie_string.len() < COOKIE_VALUE_LENGTH {
        tracing::debug!(
            "Session cookie too short: {} < {}",
            cookie_string.len(),
            COOKIE_VALUE_LENGTH
        );
        return Err(SessionError::SessionLengthError {
            expected: COOKIE_VALUE_LENGTH,
            actual: cookie_string.len(),
        });
    }
    Ok(())
}

fn validate_cookie_signature<'a>(
    secret: &str,
    cookie_string: &'a str,
) -> Result<(&'a str, &'a str), SessionError> {
    if secret.is_empty() {
        tracing::error!("Session secret is not set");
        return Err(SessionError::SessionSecretNotSet);
    }

    let signature = extract_signature(cookie_string);
    let expected = generate_signature(cookie_string, secret);

    if !signatures_match(&expected, signature) {
        tracing::warn!("Session cookie signature mismatch");
        return Err(SessionError::SignatureCheckError {
            expected,
            actual: signature.to_string(),
        });
    }

    Ok((extract_session_id(cookie_string), signature))
}
