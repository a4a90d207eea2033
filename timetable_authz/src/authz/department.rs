//! Department scope filter: constrain every department-sensitive read or
//! write to the principal's own department, unless the principal holds the
//! one role exempt from that constraint.
//!
//! Filters are derived fresh from the session snapshot on every call and
//! never cached across requests. Missing authorization data always yields
//! deny/match-nothing, never grant/match-all.

use crate::audit::{AuditKind, emit_audit_event};
use crate::session::SessionInfo;

use super::errors::AuthFailure;
use super::types::{DepartmentFilter, Role};

/// Whether the session may touch a resource of `target_department_id`
///
/// Direct-access endpoints (resource id in the URL) must call this in
/// addition to any list-query filtering; list filtering alone does not
/// protect them.
pub fn can_access_department(session: &SessionInfo, target_department_id: &str) -> bool {
    match session.role {
        Role::SuperAdmin => true,
        Role::Student | Role::Faculty | Role::Admin => {
            // A session without a department fails closed
            session.department_id.as_deref() == Some(target_department_id)
        }
    }
}

/// Derive the visibility filter for department-sensitive list queries
pub fn department_filter(session: &SessionInfo) -> DepartmentFilter {
    match session.role {
        Role::SuperAdmin => DepartmentFilter::Unrestricted,
        Role::Student | Role::Faculty | Role::Admin => match &session.department_id {
            Some(department_id) => DepartmentFilter::RestrictedTo(department_id.clone()),
            None => {
                // Provisioning bug upstream: scoped role without a
                // department. Surface it, and show nothing.
                tracing::warn!(
                    "Principal {} has role {} but no department assigned; matching zero rows",
                    session.principal_id,
                    session.role
                );
                DepartmentFilter::MatchNothing
            }
        },
    }
}

/// Explicit guard for direct access to one department's resource
///
/// Denials emit an `AccessDenied` audit event. A scoped session with no
/// department is reported as `MisconfiguredPrincipal` so operators can tell
/// a provisioning bug from an ordinary cross-department attempt.
pub fn require_department_access(
    session: &SessionInfo,
    target_department_id: &str,
) -> Result<(), AuthFailure> {
    if can_access_department(session, target_department_id) {
        return Ok(());
    }

    emit_audit_event(AuditKind::AccessDenied, &session.principal_id);

    if session.department_id.is_none() {
        tracing::warn!(
            "Principal {} denied: no department assigned (misconfigured)",
            session.principal_id
        );
        Err(AuthFailure::MisconfiguredPrincipal)
    } else {
        tracing::debug!(
            "Principal {} denied access to department {}",
            session.principal_id,
            target_department_id
        );
        Err(AuthFailure::DepartmentMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::session_info;
    use proptest::prelude::*;

    #[test]
    fn test_same_department_is_allowed() {
        let session = session_info("p1", Role::Faculty, Some("7"));
        assert!(can_access_department(&session, "7"));
    }

    #[test]
    fn test_other_department_is_denied() {
        let session = session_info("p1", Role::Faculty, Some("7"));
        assert!(!can_access_department(&session, "8"));
    }

    #[test]
    fn test_super_admin_is_exempt() {
        // Regardless of whether a department id is present on the session
        let without = session_info("root", Role::SuperAdmin, None);
        let with = session_info("root", Role::SuperAdmin, Some("3"));
        assert!(can_access_department(&without, "7"));
        assert!(can_access_department(&with, "7"));
    }

    #[test]
    fn test_missing_department_fails_closed() {
        let session = session_info("p1", Role::Faculty, None);
        assert!(!can_access_department(&session, "7"));
    }

    #[test]
    fn test_filter_super_admin_unrestricted() {
        let without = session_info("root", Role::SuperAdmin, None);
        let with = session_info("root", Role::SuperAdmin, Some("3"));
        assert_eq!(department_filter(&without), DepartmentFilter::Unrestricted);
        assert_eq!(department_filter(&with), DepartmentFilter::Unrestricted);
    }

    #[test]
    fn test_filter_scoped_role_with_department() {
        let session = session_info("p1", Role::Faculty, Some("7"));
        assert_eq!(
            department_filter(&session),
            DepartmentFilter::RestrictedTo("7".to_string())
        );
    }

    #[test]
    fn test_filter_scoped_role_without_department_matches_zero_rows() {
        let session = session_info("p1", Role::Faculty, None);
        let filter = department_filter(&session);
        assert_eq!(filter, DepartmentFilter::MatchNothing);
        assert!(!filter.matches("7"));
        assert!(!filter.matches(""));
    }

    #[test]
    fn test_require_department_access_mismatch() {
        let session = session_info("p1", Role::Student, Some("3"));
        assert!(require_department_access(&session, "3").is_ok());
        assert_eq!(
            require_department_access(&session, "5"),
            Err(AuthFailure::DepartmentMismatch)
        );
    }

    #[test]
    fn test_require_department_access_misconfigured() {
        let session = session_info("p1", Role::Student, None);
        assert_eq!(
            require_department_access(&session, "3"),
            Err(AuthFailure::MisconfiguredPrincipal)
        );
    }

    proptest! {
        /// A non-SuperAdmin session never sees another department, and a
        /// session without a department never sees anything.
        #[test]
        fn prop_scoped_sessions_fail_closed(
            own in proptest::option::of("[a-z0-9]{1,8}"),
            target in "[a-z0-9]{1,8}",
            role_idx in 0usize..3,
        ) {
            let role = [Role::Student, Role::Faculty, Role::Admin][role_idx];
            let session = session_info("p1", role, own.as_deref());

            let allowed = can_access_department(&session, &target);
            let filter = department_filter(&session);

            match own {
                Some(own) => {
                    prop_assert_eq!(allowed, own == target);
                    prop_assert_eq!(filter.matches(&target), own == target);
                }
                None => {
                    prop_assert!(!allowed);
                    prop_assert!(!filter.matches(&target));
                }
            }
        }
    }
}
