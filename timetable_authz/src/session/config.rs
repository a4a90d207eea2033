use std::sync::LazyLock;

pub static SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    std::env::var("SESSION_COOKIE_NAME")
        .ok()
        .unwrap_or("__Host-TimetableSid".to_string())
});

/// Idle timeout in seconds, applied uniformly to all principals
///
/// A session whose last activity is strictly older than this is expired.
pub(crate) static SESSION_IDLE_TIMEOUT: LazyLock<u64> = LazyLock::new(|| {
    std::env::var("SESSION_IDLE_TIMEOUT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1800) // Default to 30 minutes if not set or invalid
});

/// Lifetime of a remember-me token in seconds
pub(crate) static REMEMBER_TOKEN_MAX_AGE: LazyLock<u64> = LazyLock::new(|| {
    std::env::var("REMEMBER_TOKEN_MAX_AGE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1209600) // Default to 14 days
});
