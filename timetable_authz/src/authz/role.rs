//! Role authority: gate operations by role without leaking information to
//! unauthorized principals.
//!
//! Checks are allow-list based. An operation names the set of roles
//! permitted to proceed; any role outside that set is denied, including
//! roles introduced later.

use http::header::HeaderMap;

use crate::audit::{AuditKind, emit_audit_event};
use crate::session::{SessionInfo, require_valid_session};

use super::errors::AuthFailure;
use super::types::{AccessDecision, Role};

/// Exact role match against the session snapshot
pub fn has_role(session: &SessionInfo, role: Role) -> bool {
    session.role == role
}

pub fn is_admin(session: &SessionInfo) -> bool {
    has_role(session, Role::Admin)
}

pub fn is_faculty(session: &SessionInfo) -> bool {
    has_role(session, Role::Faculty)
}

pub fn is_student(session: &SessionInfo) -> bool {
    has_role(session, Role::Student)
}

/// Evaluate an allow-list against an (optional) validated session
///
/// Pure over the session snapshot: no store access, no side effects.
pub fn evaluate_role(session: Option<&SessionInfo>, allowed: &[Role]) -> AccessDecision {
    let Some(session) = session else {
        return AccessDecision::DeniedUnauthenticated;
    };

    if allowed.contains(&session.role) {
        AccessDecision::Allowed
    } else {
        AccessDecision::DeniedWrongRole
    }
}

/// Validate the request's session, then require one of `allowed` roles
///
/// The composition every guarded endpoint goes through: session lifecycle
/// first (absent/expired), then the role allow-list. A wrong-role denial
/// emits an `AccessDenied` audit event attributed to the session's
/// principal; absent or expired sessions carry no principal to attribute.
pub async fn require_role(
    headers: &HeaderMap,
    allowed: &[Role],
) -> Result<SessionInfo, AuthFailure> {
    let session = require_valid_session(headers).await?;

    match evaluate_role(Some(&session), allowed) {
        AccessDecision::Allowed => Ok(session),
        AccessDecision::DeniedWrongRole => {
            tracing::debug!(
                "Role {} not in allow-list for principal {}",
                session.role,
                session.principal_id
            );
            emit_audit_event(AuditKind::AccessDenied, &session.principal_id);
            Err(AuthFailure::RoleMismatch)
        }
        AccessDecision::DeniedUnauthenticated => Err(AuthFailure::SessionAbsent),
    }
}
