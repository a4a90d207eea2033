use thiserror::Error;

use crate::session::SessionError;

/// Authorization failure taxonomy
///
/// Every variant is recoverable at the boundary: the integration layer
/// translates it into a redirect (or a status code), never into a crash.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    /// No session cookie, or the token does not resolve to a stored session
    #[error("No valid session")]
    SessionAbsent,

    /// The session's idle timeout elapsed; the session has been destroyed
    #[error("Session expired")]
    SessionExpired,

    /// The session's role is not in the operation's allow-list
    #[error("Role not permitted for this operation")]
    RoleMismatch,

    /// The session's department does not match the requested resource
    #[error("Department not permitted for this operation")]
    DepartmentMismatch,

    /// The principal should be department-scoped but has no department
    #[error("Principal has no department assigned")]
    MisconfiguredPrincipal,
}

impl From<SessionError> for AuthFailure {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::SessionExpired => AuthFailure::SessionExpired,
            SessionError::SessionAbsent => AuthFailure::SessionAbsent,
            // Storage or decoding problems must not grant access; treat the
            // session as absent and leave a trail for operators.
            other => {
                tracing::error!("Session validation failed: {}", other);
                AuthFailure::SessionAbsent
            }
        }
    }
}
