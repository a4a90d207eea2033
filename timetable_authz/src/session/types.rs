use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::authz::Role;
use crate::session::errors::SessionError;
use crate::storage::CacheData;

/// Server-side session record, bound to one principal
///
/// Role and department are snapshotted at login so that per-request checks
/// never re-query the directory mid-request (accepted staleness until the
/// next login). `last_activity` is monotonically non-decreasing for the
/// record's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredSession {
    pub(crate) principal_id: String,
    pub(crate) role: Role,
    pub(crate) department_id: Option<String>,
    pub(crate) login_time: DateTime<Utc>,
    pub(crate) last_activity: DateTime<Utc>,
    pub(crate) idle_timeout: u64,
}

impl StoredSession {
    /// Expiry predicate: strictly more than `idle_timeout` seconds of
    /// idleness. Exactly at the boundary the session is still valid.
    pub(crate) fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.last_activity) > Duration::seconds(self.idle_timeout as i64)
    }

    /// Refresh `last_activity`, never moving it backwards
    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.last_activity {
            self.last_activity = now;
        }
    }
}

impl From<StoredSession> for CacheData {
    fn from(data: StoredSession) -> Self {
        Self {
            value: serde_json::to_string(&data).expect("Failed to serialize StoredSession"),
        }
    }
}

impl TryFrom<CacheData> for StoredSession {
    type Error = SessionError;

    fn try_from(data: CacheData) -> Result<Self, Self::Error> {
        serde_json::from_str(&data.value).map_err(|e| SessionError::Storage(e.to_string()))
    }
}

/// Validated per-request session snapshot handed to callers
///
/// The role authority and department scope filter are pure functions over
/// this value; they own no state of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: String,
    pub principal_id: String,
    pub role: Role,
    pub department_id: Option<String>,
    pub login_time: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl SessionInfo {
    pub(crate) fn from_stored(session_id: &str, stored: &StoredSession) -> Self {
        Self {
            session_id: session_id.to_string(),
            principal_id: stored.principal_id.clone(),
            role: stored.role,
            department_id: stored.department_id.clone(),
            login_time: stored.login_time,
            last_activity: stored.last_activity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(last_activity: DateTime<Utc>, idle_timeout: u64) -> StoredSession {
        StoredSession {
            principal_id: "p1".to_string(),
            role: Role::Student,
            department_id: Some("3".to_string()),
            login_time: last_activity,
            last_activity,
            idle_timeout,
        }
    }

    #[test]
    fn test_expiry_boundary_is_strict() {
        let start = Utc::now();
        let session = stored(start, 600);

        // Exactly at the timeout the session is NOT expired
        assert!(!session.is_expired_at(start + Duration::seconds(600)));
        // One second past, it is
        assert!(session.is_expired_at(start + Duration::seconds(601)));
    }

    #[test]
    fn test_not_expired_when_fresh() {
        let start = Utc::now();
        let session = stored(start, 600);
        assert!(!session.is_expired_at(start));
        assert!(!session.is_expired_at(start + Duration::seconds(1)));
    }

    #[test]
    fn test_touch_is_monotonic() {
        let start = Utc::now();
        let mut session = stored(start, 600);

        // A clock reading older than last_activity must not move it back
        session.touch(start - Duration::seconds(30));
        assert_eq!(session.last_activity, start);

        let later = start + Duration::seconds(5);
        session.touch(later);
        assert_eq!(session.last_activity, later);
    }

    #[test]
    fn test_cache_round_trip() {
        let start = Utc::now();
        let session = stored(start, 600);

        let data: CacheData = session.clone().into();
        let restored: StoredSession = data.try_into().expect("Failed to restore session");

        assert_eq!(restored.principal_id, session.principal_id);
        assert_eq!(restored.role, session.role);
        assert_eq!(restored.department_id, session.department_id);
        assert_eq!(restored.last_activity, session.last_activity);
        assert_eq!(restored.idle_timeout, session.idle_timeout);
    }

    #[test]
    fn test_malformed_cache_data_is_storage_error() {
        let data = CacheData {
            value: r#"{"principal_id": "truncated"#.to_string(),
        };

        let result = StoredSession::try_from(data);
        assert!(matches!(result, Err(SessionError::Storage(_))));
    }
}
