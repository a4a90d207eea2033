//! Central configuration for the timetable_authz_axum crate

use std::sync::LazyLock;

use timetable_authz::TTP_ROUTE_PREFIX;

/// URL of the login surface
///
/// Unauthenticated and expired sessions are redirected here, optionally
/// carrying a `return_to` target. Default: "{TTP_ROUTE_PREFIX}/login"
pub static TTP_LOGIN_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("TTP_LOGIN_URL").unwrap_or_else(|_| format!("{}/login", *TTP_ROUTE_PREFIX))
});

/// URL of the unauthorized surface
///
/// Role and department mismatches land here. Deliberately carries no
/// return-to target, to avoid leaking what the denied resource was.
/// Default: "{TTP_ROUTE_PREFIX}/unauthorized"
pub static TTP_UNAUTHORIZED_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("TTP_UNAUTHORIZED_URL")
        .unwrap_or_else(|_| format!("{}/unauthorized", *TTP_ROUTE_PREFIX))
});

/// Whether login redirects append `?return_to=<original path>`
pub static TTP_LOGIN_RETURN_TO: LazyLock<bool> = LazyLock::new(|| {
    std::env::var("TTP_LOGIN_RETURN_TO")
        .map(|val| val.to_lowercase() != "false")
        .unwrap_or(true)
});

#[cfg(test)]
mod tests {

    // Helper functions that replicate the logic of the LazyLock
    // initializers so we can test them without touching the environment.

    fn get_login_url(route_prefix: &str, env_value: Option<&str>) -> String {
        env_value
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("{route_prefix}/login"))
    }

    fn get_unauthorized_url(route_prefix: &str, env_value: Option<&str>) -> String {
        env_value
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("{route_prefix}/unauthorized"))
    }

    fn get_login_return_to(env_value: Option<&str>) -> bool {
        env_value
            .map(|val| val.to_lowercase() != "false")
            .unwrap_or(true)
    }

    #[test]
    fn test_login_url_default() {
        assert_eq!(get_login_url("/auth", None), "/auth/login");
    }

    #[test]
    fn test_login_url_custom() {
        assert_eq!(
            get_login_url("/auth", Some("/accounts/sign-in")),
            "/accounts/sign-in"
        );
    }

    #[test]
    fn test_unauthorized_url_default() {
        assert_eq!(get_unauthorized_url("/auth", None), "/auth/unauthorized");
    }

    #[test]
    fn test_login_return_to_flag() {
        assert!(get_login_return_to(None));
        assert!(get_login_return_to(Some("true")));
        assert!(!get_login_return_to(Some("false")));
        assert!(!get_login_return_to(Some("FALSE")));
    }
}
