use chrono::{Duration, Utc};
use http::header::HeaderMap;

use crate::session::config::{SESSION_COOKIE_NAME, SESSION_IDLE_TIMEOUT};
use crate::session::errors::SessionError;
use crate::utils::header_set_cookie;

/// Headers issuing the session cookie for a freshly created session
pub(super) fn new_session_header(session_id: &str) -> Result<HeaderMap, SessionError> {
    let max_age = *SESSION_IDLE_TIMEOUT as i64;
    let expires_at = Utc::now() + Duration::seconds(max_age);

    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        SESSION_COOKIE_NAME.as_str(),
        session_id,
        expires_at,
        max_age,
    )?;
    Ok(headers)
}

/// Headers clearing the session cookie: an already-expired value with the
/// same path/secure/httponly attributes it was issued with
pub(super) fn clear_session_header() -> Result<HeaderMap, SessionError> {
    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        SESSION_COOKIE_NAME.as_str(),
        "deleted",
        Utc::now() - Duration::seconds(86400),
        -86400,
    )?;
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::SET_COOKIE;

    #[test]
    fn test_new_session_header_carries_cookie() {
        let headers = new_session_header("sid123").expect("Failed to build headers");
        let cookie = headers
            .get(SET_COOKIE)
            .expect("Set-Cookie missing")
            .to_str()
            .expect("Invalid header value");

        assert!(cookie.contains("=sid123"));
        assert!(cookie.contains("HttpOnly"));
    }

    #[test]
    fn test_clear_session_header_expires_cookie() {
        let headers = clear_session_header().expect("Failed to build headers");
        let cookie = headers
            .get(SET_COOKIE)
            .expect("Set-Cookie missing")
            .to_str()
            .expect("Invalid header value");

        assert!(cookie.contains("Max-Age=-86400"));
        // Attributes must match those the cookie was issued with
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("Path=/"));
    }
}
