use std::sync::LazyLock;

/// Random octets behind every session identifier.
///
/// Changing this moves `SIGNATURE_START` and invalidates every cookie issued before.
pub const ID_OCTETS: usize = 16;

/// Byte offset where the signature starts inside a cookie value.
pub const SIGNATURE_START: usize = base64url_len(ID_OCTETS);

/// HMAC-SHA256 output, base64url without padding.
pub const SIGNATURE_LENGTH: usize = base64url_len(32);

/// Minimum length of a cookie value holding identifier and signature.
pub const COOKIE_VALUE_LENGTH: usize = SIGNATURE_START + SIGNATURE_LENGTH;

const fn base64url_len(octets: usize) -> usize {
    (octets * 4).div_ceil(3)
}

pub static SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    std::env::var("SESSION_COOKIE_NAME")
        .ok()
        .unwrap_or("__Host-SessionId".to_string())
});

/// Secret used by the HTTP layer when signing and validating cookies.
///
/// Empty when unset, so every signing attempt fails with `SessionSecretNotSet`.
pub static SESSION_SECRET: LazyLock<String> =
    LazyLock::new(|| std::env::var("SESSION_SECRET").unwrap_or_default());

/// Lifetime of a newly created session, in seconds.
pub static SESSION_EXPIRY_PERIOD: LazyLock<u64> = LazyLock::new(|| {
    std::env::var("SESSION_EXPIRY_PERIOD")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3600) // Default to 1 hour if not set or invalid
});
