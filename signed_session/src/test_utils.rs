//! Test utilities shared by the unit tests of this crate

use std::env;
use std::sync::Once;

use chrono::{Duration, Utc};
use serde_json::json;

use crate::session::SessionData;

/// Load `.env_test` (falling back to `.env`) once per test binary.
pub(crate) fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }
    });
}

/// Set an environment variable for the duration of `test`, then restore it.
///
/// Callers must be `#[serial]`.
pub(crate) fn with_env_var<F, R>(key: &str, value: Option<&str>, test: F) -> R
where
    F: FnOnce() -> R,
{
    init_test_environment();
    let original = env::var(key).ok();

    match value {
        Some(val) => unsafe { env::set_var(key, val) },
        None => unsafe { env::remove_var(key) },
    }

    let result = test();

    match original {
        Some(val) => unsafe { env::set_var(key, val) },
        None => unsafe { env::remove_var(key) },
    }

    result
}

pub(crate) fn future_millis() -> i64 {
    (Utc::now() + Duration::hours(1)).timestamp_millis()
}

pub(crate) fn past_millis() -> i64 {
    (Utc::now() - Duration::hours(1)).timestamp_millis()
}

/// Payload of a signed-in session expiring at `expires` (epoch milliseconds).
pub(crate) fn signed_in_session_data(expires: i64) -> SessionData {
    SessionData::from([
        ("Id".to_string(), json!("AAAAAAAAAAAAAAAAAAAAAA")),
        ("ClientSig".to_string(), json!("signature")),
        (
            "SignInInfo".to_string(),
            json!({ "AccessToken": { "value": "token", "created_at": 0, "expires_at": expires } }),
        ),
        ("Expires".to_string(), json!(expires)),
    ])
}
