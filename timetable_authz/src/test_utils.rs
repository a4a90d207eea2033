//! Shared test initialization and helpers
//!
//! Centralizes environment loading and store setup so tests across the
//! crate run against the same in-memory cache store and sqlite directory.

use std::sync::{Mutex, Once};

use chrono::{DateTime, Utc};
use http::header::{COOKIE, HeaderMap};

use crate::audit::{AuditEvent, AuditSink};
use crate::authz::Role;
use crate::session::{SESSION_COOKIE_NAME, SessionInfo, StoredSession};
use crate::storage::GENERIC_CACHE_STORE;
use crate::userdb::{Principal, PrincipalStatus, PrincipalStore};

/// Centralized test initialization for all tests across the crate
///
/// Loads `.env_test` (falling back to `.env`) once, then makes sure the
/// stores are reachable. Tests touching the global stores run under
/// `#[serial]`.
pub(crate) async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }
    });

    if let Err(e) = PrincipalStore::init().await {
        eprintln!("Warning: Failed to initialize PrincipalStore: {e}");
    }
}

/// An Active principal ready to hold a session
pub(crate) fn active_principal(id: &str, role: Role, department_id: Option<&str>) -> Principal {
    let mut principal = Principal::new(
        id.to_string(),
        format!("{id}@example.edu"),
        format!("Principal {id}"),
        role,
        department_id.map(|d| d.to_string()),
    );
    principal.status = PrincipalStatus::Active;
    principal
}

/// A validated session snapshot, bypassing the store, for pure authz tests
pub(crate) fn session_info(
    principal_id: &str,
    role: Role,
    department_id: Option<&str>,
) -> SessionInfo {
    let now = Utc::now();
    SessionInfo {
        session_id: format!("test-session-{}", uuid::Uuid::new_v4()),
        principal_id: principal_id.to_string(),
        role,
        department_id: department_id.map(|d| d.to_string()),
        login_time: now,
        last_activity: now,
    }
}

/// Insert a session record directly into the cache store, controlling its
/// `last_activity` to exercise expiry paths
pub(crate) async fn insert_stored_session(
    session_id: &str,
    principal_id: &str,
    role: Role,
    department_id: Option<&str>,
    last_activity: DateTime<Utc>,
    idle_timeout: u64,
) {
    let stored = StoredSession {
        principal_id: principal_id.to_string(),
        role,
        department_id: department_id.map(|d| d.to_string()),
        login_time: last_activity,
        last_activity,
        idle_timeout,
    };

    GENERIC_CACHE_STORE
        .lock()
        .await
        .put_with_ttl("session", session_id, stored.into(), idle_timeout as usize)
        .await
        .expect("Failed to insert test session");
}

/// Request headers carrying the session cookie
pub(crate) fn request_headers_with_session(session_id: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let cookie = format!("{}={}", SESSION_COOKIE_NAME.as_str(), session_id);
    headers.insert(COOKIE, cookie.parse().expect("Invalid cookie value"));
    headers
}

/// Audit sink that records every event for assertions
pub(crate) struct RecordingAuditSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl RecordingAuditSink {
    pub(crate) fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn events(&self) -> Vec<AuditEvent> {
        self.events
            .lock()
            .expect("audit sink lock poisoned")
            .clone()
    }
}

impl AuditSink for RecordingAuditSink {
    fn emit(&self, event: &AuditEvent) {
        self.events
            .lock()
            .expect("audit sink lock poisoned")
            .push(event.clone());
    }
}
