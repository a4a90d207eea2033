use thiserror::Error;

use crate::userdb::PrincipalError;
use crate::utils::UtilError;

#[derive(Debug, Error, Clone)]
pub enum SessionError {
    /// No stored session for the presented token
    #[error("No session")]
    SessionAbsent,

    /// Idle timeout elapsed; the stored session has been destroyed
    #[error("Session expired")]
    SessionExpired,

    /// Only Active principals may hold a session
    #[error("Principal is not active: {0}")]
    PrincipalNotActive(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Cookie error: {0}")]
    Cookie(String),

    #[error("Header error: {0}")]
    HeaderError(String),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),

    /// Error from the principal directory
    #[error("Principal error: {0}")]
    Principal(#[from] PrincipalError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(SessionError::SessionAbsent.to_string(), "No session");
        assert_eq!(SessionError::SessionExpired.to_string(), "Session expired");
        assert_eq!(
            SessionError::PrincipalNotActive("p1".to_string()).to_string(),
            "Principal is not active: p1"
        );
        assert_eq!(
            SessionError::Storage("boom".to_string()).to_string(),
            "Storage error: boom"
        );
    }

    #[test]
    fn test_from_util_error() {
        let err: SessionError = UtilError::Crypto("rng failed".to_string()).into();
        assert!(matches!(err, SessionError::Utils(_)));
    }

    #[test]
    fn test_from_principal_error() {
        let err: SessionError = PrincipalError::NotFound.into();
        assert!(matches!(err, SessionError::Principal(_)));
    }

    #[test]
    fn test_error_is_sync_and_send() {
        fn assert_sync_send<T: Sync + Send>() {}
        assert_sync_send::<SessionError>();
    }
}
