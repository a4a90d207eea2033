//! Axum integration for the timetable portal authorization core.
//!
//! Provides the [`AuthPrincipal`] extractor, route-guard middleware for
//! each role tier, and a small router with the logout endpoint. Session
//! validation, role authority, and department scoping live in the
//! `timetable_authz` crate; this crate translates their outcomes into
//! HTTP responses (login redirects with `return_to`, 401/403 statuses).

mod config;
mod error;
mod middleware;
mod router;
mod session;

pub use config::{TTP_LOGIN_RETURN_TO, TTP_LOGIN_URL, TTP_UNAUTHORIZED_URL};
pub use error::IntoResponseError;
pub use middleware::{
    admin_only, admin_or_super_admin, faculty_only, require_session, student_only,
    super_admin_only,
};
pub use router::timetable_authz_router;
pub use session::{AuthPrincipal, AuthRedirect};

// Re-export the route prefix and initialization function from timetable_authz
pub use timetable_authz::{TTP_ROUTE_PREFIX, init};
