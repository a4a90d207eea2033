//! timetable_authz - Authorization and session core for a university timetable portal
//!
//! This crate answers three questions for every incoming request:
//! which authenticated principal does it belong to (session lifecycle),
//! is that principal's role allowed to perform the operation (role
//! authority), and which department's rows may it ever see (department
//! scope filter). Credential verification, page rendering and audit-log
//! persistence are external collaborators.

mod audit;
mod authz;
mod config;
mod session;
mod storage;
mod userdb;
mod utils;

#[cfg(test)]
mod test_utils;

pub use audit::{AuditEvent, AuditKind, AuditSink, set_audit_sink};

pub use authz::{
    AccessDecision, AuthFailure, DepartmentFilter, Role, can_access_department, department_filter,
    evaluate_role, has_role, is_admin, is_faculty, is_student, require_department_access,
    require_role,
};

pub use config::TTP_ROUTE_PREFIX;

pub use session::{
    SESSION_COOKIE_NAME, SessionError, SessionInfo, create_session, destroy_session,
    issue_remember_token, prepare_logout_response, require_valid_session, revoke_remember_token,
    session_id_from_headers, validate_session,
};

pub use userdb::{Principal, PrincipalError, PrincipalStatus, PrincipalStore};

/// Initialize the authorization core
///
/// Connects the principal directory and the session store. Call once at
/// application startup, before any request is served.
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    storage::init().await?;
    userdb::init().await?;
    Ok(())
}
