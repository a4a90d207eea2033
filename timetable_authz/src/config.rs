//! Central configuration for the timetable_authz crate

use std::sync::LazyLock;

/// Route prefix for all authentication endpoints
///
/// Integration layers mount their login/logout/unauthorized surfaces under
/// this prefix. Default: "/auth"
pub static TTP_ROUTE_PREFIX: LazyLock<String> =
    LazyLock::new(|| std::env::var("TTP_ROUTE_PREFIX").unwrap_or_else(|_| "/auth".to_string()));
