use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use http::header::{HeaderMap, SET_COOKIE};
use ring::rand::SecureRandom;

use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum UtilError {
    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Cookie error: {0}")]
    Cookie(String),
}

/// Generate a URL-safe random string of `len` bytes of entropy
pub(crate) fn gen_random_string(len: usize) -> Result<String, UtilError> {
    let rng = ring::rand::SystemRandom::new();
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes)
        .map_err(|_| UtilError::Crypto("Failed to generate random string".to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Append a Set-Cookie header with the attributes every session cookie is
/// issued with. Clearing a cookie reuses the same attributes with an
/// already-expired value (negative max_age).
pub(crate) fn header_set_cookie<'a>(
    headers: &'a mut HeaderMap,
    name: &str,
    value: &str,
    _expires_at: DateTime<Utc>,
    max_age: i64,
) -> Result<&'a HeaderMap, UtilError> {
    let cookie =
        format!("{name}={value}; SameSite=Lax; Secure; HttpOnly; Path=/; Max-Age={max_age}");
    headers.append(
        SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| UtilError::Cookie("Failed to parse cookie".to_string()))?,
    );
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_gen_random_string_length_and_uniqueness() {
        // 32 bytes of entropy encode to 43 base64url characters
        let a = gen_random_string(32).expect("Failed to generate random string");
        let b = gen_random_string(32).expect("Failed to generate random string");
        assert_eq!(a.len(), 43);
        assert_ne!(a, b);
    }

    #[test]
    fn test_gen_random_string_is_url_safe() {
        let s = gen_random_string(64).expect("Failed to generate random string");
        assert!(
            s.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_header_set_cookie_attributes() {
        let mut headers = HeaderMap::new();
        header_set_cookie(
            &mut headers,
            "__Host-TimetableSid",
            "abc123",
            Utc::now() + Duration::seconds(600),
            600,
        )
        .expect("Failed to set cookie");

        let cookie = headers
            .get(SET_COOKIE)
            .expect("Set-Cookie header missing")
            .to_str()
            .expect("Invalid header value");
        assert!(cookie.starts_with("__Host-TimetableSid=abc123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=600"));
    }

    #[test]
    fn test_header_set_cookie_expired_value() {
        // Logout clears the cookie by issuing a negative Max-Age
        let mut headers = HeaderMap::new();
        header_set_cookie(
            &mut headers,
            "__Host-TimetableSid",
            "expired",
            Utc::now() - Duration::seconds(86400),
            -86400,
        )
        .expect("Failed to set cookie");

        let cookie = headers
            .get(SET_COOKIE)
            .expect("Set-Cookie header missing")
            .to_str()
            .expect("Invalid header value");
        assert!(cookie.contains("Max-Age=-86400"));
    }
}
