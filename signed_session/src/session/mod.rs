mod config;
mod errors;
mod main;
mod types;

pub use config::{
    COOKIE_VALUE_LENGTH, ID_OCTETS, SESSION_COOKIE_NAME, SESSION_EXPIRY_PERIOD, SESSION_SECRET,
    SIGNATURE_LENGTH, SIGNATURE_START,
};
pub use errors::SessionError;
pub use main::{
    Cookie, Session, VerifiedSession, extract_session_id, extract_signature, generate_session_id,
    generate_signature, verify_session, verify_session_at,
};
pub use types::{SessionData, SessionKey};
