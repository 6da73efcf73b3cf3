use thiserror::Error;

use crate::utils::UtilError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session secret is not set")]
    SessionSecretNotSet,

    #[error("Session cookie too short: expected at least {expected} characters, got {actual}")]
    SessionLengthError { expected: usize, actual: usize },

    /// `expected` is the signature an honest signer would produce. Keep it out of
    /// responses sent to clients.
    #[error("Session cookie signature check failed")]
    SignatureCheckError { expected: String, actual: String },

    #[error("Sign-in info missing from session")]
    SignInInfoMissingError,

    #[error("Access token missing from sign-in info")]
    AccessTokenMissingError,

    #[error("Expiry missing from session")]
    ExpiresMissingError,

    #[error("Session expired error")]
    SessionExpiredError,

    #[error("Expiry period out of range")]
    ExpiryPeriodOutOfRange,

    #[error("Cookie error: {0}")]
    Cookie(String),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Invalid session format: {0}")]
    Format(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}

impl SessionError {
    /// True when the failure means the client is simply not signed in.
    ///
    /// Configuration, cookie construction, crypto, format and storage faults
    /// return false.
    pub fn requires_sign_in(&self) -> bool {
        matches!(
            self,
            SessionError::SessionLengthError { .. }
                | SessionError::SignatureCheckError { .. }
                | SessionError::SignInInfoMissingError
                | SessionError::AccessTokenMissingError
                | SessionError::ExpiresMissingError
                | SessionError::SessionExpiredError
        )
    }

    /// True when the cookie signature did not match, i.e. possible tampering.
    pub fn is_tampering(&self) -> bool {
        matches!(self, SessionError::SignatureCheckError { .. })
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Format(err.to_string())
    }
}

impl From<rmp_serde::encode::Error> for SessionError {
    fn from(err: rmp_serde::encode::Error) -> Self {
        SessionError::Format(err.to_string())
    }
}

impl From<rmp_serde::decode::Error> for SessionError {
    fn from(err: rmp_serde::decode::Error) -> Self {
        SessionError::Format(err.to_string())
    }
}
