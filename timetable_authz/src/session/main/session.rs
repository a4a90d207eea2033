use chrono::Utc;
use http::header::{COOKIE, HeaderMap};

use crate::audit::{AuditKind, emit_audit_event};
use crate::authz::AuthFailure;
use crate::session::config::{REMEMBER_TOKEN_MAX_AGE, SESSION_COOKIE_NAME, SESSION_IDLE_TIMEOUT};
use crate::session::errors::SessionError;
use crate::session::types::{SessionInfo, StoredSession};
use crate::storage::{CacheData, GENERIC_CACHE_STORE};
use crate::userdb::Principal;
use crate::utils::gen_random_string;

use super::cookie::{clear_session_header, new_session_header};

const SESSION_PREFIX: &str = "session";
const REMEMBER_PREFIX: &str = "remember";

/// Create a session for a principal whose credentials have already been
/// verified by the external credential verifier
///
/// Only `Active` principals may hold a session. Role and department are
/// snapshotted here; they are not re-read from the directory until the next
/// login. Emits a `LOGIN_SUCCESS` audit event.
///
/// # Returns
/// * The Set-Cookie headers to send to the client, and the session id
pub async fn create_session(principal: &Principal) -> Result<(HeaderMap, String), SessionError> {
    if !principal.is_active() {
        tracing::warn!(
            "Refusing session for principal {} with status {}",
            principal.id,
            principal.status
        );
        return Err(SessionError::PrincipalNotActive(principal.id.clone()));
    }

    let session_id = gen_random_string(32)?;
    let now = Utc::now();
    let idle_timeout = *SESSION_IDLE_TIMEOUT;

    let stored_session = StoredSession {
        principal_id: principal.id.clone(),
        role: principal.role,
        department_id: principal.department_id.clone(),
        login_time: now,
        last_activity: now,
        idle_timeout,
    };

    GENERIC_CACHE_STORE
        .lock()
        .await
        .put_with_ttl(
            SESSION_PREFIX,
            &session_id,
            stored_session.into(),
            idle_timeout as usize,
        )
        .await
        .map_err(|e| SessionError::Storage(e.to_string()))?;

    let headers = new_session_header(&session_id)?;

    emit_audit_event(AuditKind::LoginSuccess, &principal.id);
    tracing::debug!("Created session for principal {}", principal.id);

    Ok((headers, session_id))
}

/// Validate a candidate session token and refresh its activity timestamp
///
/// Absent tokens yield `SessionAbsent`. A session idle strictly longer than
/// its timeout yields `SessionExpired` and is destroyed as a side effect of
/// detection, so a subsequent request with the same token sees
/// `SessionAbsent`. Otherwise `last_activity` moves forward to now (never
/// backwards) under a single store-lock acquisition, so concurrent requests
/// for the same session cannot tear the record.
pub async fn validate_session(session_id: &str) -> Result<SessionInfo, SessionError> {
    let mut store = GENERIC_CACHE_STORE.lock().await;

    let cached_session = store
        .get(SESSION_PREFIX, session_id)
        .await
        .map_err(|e| SessionError::Storage(e.to_string()))?
        .ok_or(SessionError::SessionAbsent)?;

    let mut stored_session: StoredSession = cached_session.try_into()?;

    let now = Utc::now();
    if stored_session.is_expired_at(now) {
        tracing::debug!(
            "Session for principal {} expired after {}s idle; destroying",
            stored_session.principal_id,
            stored_session.idle_timeout
        );
        store
            .remove(SESSION_PREFIX, session_id)
            .await
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        // Destruction revokes the principal's remember-me token too; the
        // stored record is the last place the principal id is known from
        store
            .remove(REMEMBER_PREFIX, &stored_session.principal_id)
            .await
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        return Err(SessionError::SessionExpired);
    }

    stored_session.touch(now);
    store
        .put_with_ttl(
            SESSION_PREFIX,
            session_id,
            stored_session.clone().into(),
            stored_session.idle_timeout as usize,
        )
        .await
        .map_err(|e| SessionError::Storage(e.to_string()))?;

    Ok(SessionInfo::from_stored(session_id, &stored_session))
}

/// Destroy a session and revoke the principal's remember-me token
///
/// Once destroyed, a session is unrecoverable; only a fresh login re-enters
/// the authenticated state. Emits a `LOGOUT` audit event when the
/// destruction was principal-initiated. Destroying an already-destroyed
/// session is a no-op, not an error.
pub async fn destroy_session(
    session_id: &str,
    principal_initiated: bool,
) -> Result<(), SessionError> {
    let mut store = GENERIC_CACHE_STORE.lock().await;

    let principal_id = match store
        .get(SESSION_PREFIX, session_id)
        .await
        .map_err(|e| SessionError::Storage(e.to_string()))?
    {
        Some(cached) => StoredSession::try_from(cached)
            .map(|s| s.principal_id)
            .ok(),
        None => None,
    };

    store
        .remove(SESSION_PREFIX, session_id)
        .await
        .map_err(|e| SessionError::Storage(e.to_string()))?;

    if let Some(principal_id) = principal_id {
        store
            .remove(REMEMBER_PREFIX, &principal_id)
            .await
            .map_err(|e| SessionError::Storage(e.to_string()))?;

        if principal_initiated {
            emit_audit_event(AuditKind::Logout, &principal_id);
        }
        tracing::debug!("Destroyed session for principal {}", principal_id);
    }

    Ok(())
}

/// Extract the session token from the request's Cookie header
pub fn session_id_from_headers(headers: &HeaderMap) -> Result<Option<&str>, SessionError> {
    let Some(cookie_header) = headers.get(COOKIE) else {
        tracing::debug!("No cookie header found");
        return Ok(None);
    };

    let cookie_str = cookie_header.to_str().map_err(|e| {
        tracing::error!("Invalid cookie header: {}", e);
        SessionError::HeaderError("Invalid cookie header".to_string())
    })?;

    let cookie_name = SESSION_COOKIE_NAME.as_str();

    let session_id = cookie_str.split(';').map(|s| s.trim()).find_map(|s| {
        let mut parts = s.splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some(k), Some(v)) if k == cookie_name => Some(v),
            _ => None,
        }
    });

    if session_id.is_none() {
        tracing::debug!("No session cookie '{}' found in cookies", cookie_name);
    }

    Ok(session_id)
}

/// Validate the request's session or fail with an `AuthFailure`
///
/// The convenience composition consumers use to halt processing on failure;
/// the integration layer translates the failure into a redirect.
pub async fn require_valid_session(headers: &HeaderMap) -> Result<SessionInfo, AuthFailure> {
    let Some(session_id) = session_id_from_headers(headers).map_err(AuthFailure::from)? else {
        return Err(AuthFailure::SessionAbsent);
    };

    validate_session(session_id).await.map_err(AuthFailure::from)
}

/// Prepare a logout response: clear the session cookie and destroy the
/// session named by the request's cookie header
pub async fn prepare_logout_response(headers: &HeaderMap) -> Result<HeaderMap, SessionError> {
    let response_headers = clear_session_header()?;

    if let Some(session_id) = session_id_from_headers(headers)? {
        destroy_session(session_id, true).await?;
    }

    Ok(response_headers)
}

/// Issue an opaque remember-me token for a principal
///
/// The token lives in the session store keyed by principal, so destroying
/// any of the principal's sessions revokes it. Delivering the token to the
/// client is the application's concern.
pub async fn issue_remember_token(principal_id: &str) -> Result<String, SessionError> {
    let token = gen_random_string(32)?;

    GENERIC_CACHE_STORE
        .lock()
        .await
        .put_with_ttl(
            REMEMBER_PREFIX,
            principal_id,
            CacheData {
                value: token.clone(),
            },
            *REMEMBER_TOKEN_MAX_AGE as usize,
        )
        .await
        .map_err(|e| SessionError::Storage(e.to_string()))?;

    Ok(token)
}

/// Revoke a principal's remember-me token, if any
pub async fn revoke_remember_token(principal_id: &str) -> Result<(), SessionError> {
    GENERIC_CACHE_STORE
        .lock()
        .await
        .remove(REMEMBER_PREFIX, principal_id)
        .await
        .map_err(|e| SessionError::Storage(e.to_string()))
}
