use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    response::{IntoResponse, Redirect, Response},
};
use chrono::{DateTime, Utc};
use http::{Method, StatusCode, request::Parts};
use std::convert::Infallible;

use timetable_authz::{AuthFailure, Role, SessionInfo, require_valid_session};

use super::config::{TTP_LOGIN_RETURN_TO, TTP_LOGIN_URL, TTP_UNAUTHORIZED_URL};

/// Translation of an `AuthFailure` into an HTTP response
///
/// Unauthenticated failures go to the login surface, optionally carrying a
/// `return_to` target; role and department failures go to the unauthorized
/// surface with no return-to, so the denied resource is not leaked.
/// Non-GET requests receive a status code instead of a redirect.
pub struct AuthRedirect {
    failure: AuthFailure,
    method: Method,
    path: String,
}

impl AuthRedirect {
    pub(crate) fn new(failure: AuthFailure, method: Method, path: String) -> Self {
        Self {
            failure,
            method,
            path,
        }
    }

    pub(crate) fn login_location(path: &str) -> String {
        if *TTP_LOGIN_RETURN_TO && !path.is_empty() {
            format!(
                "{}?return_to={}",
                TTP_LOGIN_URL.as_str(),
                urlencoding::encode(path)
            )
        } else {
            TTP_LOGIN_URL.to_string()
        }
    }
}

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        match self.failure {
            AuthFailure::SessionAbsent | AuthFailure::SessionExpired => {
                if self.method == Method::GET {
                    let location = Self::login_location(&self.path);
                    tracing::debug!("Redirecting to login: {}", location);
                    Redirect::temporary(&location).into_response()
                } else {
                    (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
                }
            }
            AuthFailure::RoleMismatch
            | AuthFailure::DepartmentMismatch
            | AuthFailure::MisconfiguredPrincipal => {
                if self.method == Method::GET {
                    tracing::debug!("Redirecting to {}", TTP_UNAUTHORIZED_URL.as_str());
                    Redirect::temporary(TTP_UNAUTHORIZED_URL.as_str()).into_response()
                } else {
                    (StatusCode::FORBIDDEN, "Forbidden").into_response()
                }
            }
        }
    }
}

/// Authenticated session snapshot, available as an axum extractor
///
/// When used as an extractor it validates the session cookie (refreshing
/// the idle-timeout clock) and rejects with [`AuthRedirect`] on failure.
/// The snapshot is the one taken at login; it is never re-read from the
/// principal directory mid-request.
///
/// # Example
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use timetable_authz_axum::AuthPrincipal;
///
/// async fn protected_handler(principal: AuthPrincipal) -> String {
///     format!("Hello, {}!", principal.principal_id)
/// }
///
/// let app: Router = Router::new()
///     .route("/protected", get(protected_handler));
/// ```
#[derive(Clone, Debug)]
pub struct AuthPrincipal {
    /// Session token the request presented
    pub session_id: String,
    /// Unique principal identifier
    pub principal_id: String,
    /// Permission tier snapshotted at login
    pub role: Role,
    /// Department snapshotted at login; absent for SuperAdmin
    pub department_id: Option<String>,
    /// When the session was created
    pub login_time: DateTime<Utc>,
    /// Last validated activity
    pub last_activity: DateTime<Utc>,
}

impl From<SessionInfo> for AuthPrincipal {
    fn from(session: SessionInfo) -> Self {
        Self {
            session_id: session.session_id,
            principal_id: session.principal_id,
            role: session.role,
            department_id: session.department_id,
            login_time: session.login_time,
            last_activity: session.last_activity,
        }
    }
}

impl From<&AuthPrincipal> for SessionInfo {
    fn from(principal: &AuthPrincipal) -> Self {
        SessionInfo {
            session_id: principal.session_id.clone(),
            principal_id: principal.principal_id.clone(),
            role: principal.role,
            department_id: principal.department_id.clone(),
            login_time: principal.login_time,
            last_activity: principal.last_activity,
        }
    }
}

impl<S> FromRequestParts<S> for AuthPrincipal
where
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match require_valid_session(&parts.headers).await {
            Ok(session) => Ok(AuthPrincipal::from(session)),
            Err(failure) => Err(AuthRedirect::new(
                failure,
                parts.method.clone(),
                parts.uri.path().to_string(),
            )),
        }
    }
}

impl<S> OptionalFromRequestParts<S> for AuthPrincipal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(require_valid_session(&parts.headers)
            .await
            .ok()
            .map(AuthPrincipal::from))
    }
}
