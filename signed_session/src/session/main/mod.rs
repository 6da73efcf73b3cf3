mod cookie;
mod session;
mod signing;
mod verified;

pub use cookie::Cookie;
pub use session::Session;
pub use signing::{extract_session_id, extract_signature, generate_session_id, generate_signature};
pub use verified::{VerifiedSession, verify_session, verify_session_at};
