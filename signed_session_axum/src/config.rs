//! Configuration for the axum integration

use std::sync::LazyLock;

/// Where anonymous GET requests are redirected.
/// Default: "/signin"
pub static SESSION_SIGNIN_URL: LazyLock<String> =
    LazyLock::new(|| std::env::var("SESSION_SIGNIN_URL").unwrap_or_else(|_| "/signin".to_string()));

/// Query parameter carrying the originally requested path
pub const REFERER_PARAM: &str = "referer";
