use axum::{
    Router,
    response::{IntoResponse, Redirect},
    routing::get,
};
use http::{HeaderMap, StatusCode};

use timetable_authz::prepare_logout_response;

use super::config::TTP_LOGIN_URL;
use super::error::IntoResponseError;

/// Router for the authorization endpoints
///
/// Mount it under [`TTP_ROUTE_PREFIX`](timetable_authz::TTP_ROUTE_PREFIX):
///
/// ```no_run
/// use axum::Router;
/// use timetable_authz::TTP_ROUTE_PREFIX;
/// use timetable_authz_axum::timetable_authz_router;
///
/// let app: Router = Router::new()
///     .nest(TTP_ROUTE_PREFIX.as_str(), timetable_authz_router());
/// ```
pub fn timetable_authz_router() -> Router {
    Router::new().route("/logout", get(logout).post(logout))
}

/// Destroys the presented session and clears the cookie
///
/// Safe to hit with a stale or absent cookie; logout is idempotent and
/// always lands on the login surface.
async fn logout(headers: HeaderMap) -> Result<impl IntoResponse, (StatusCode, String)> {
    let headers = prepare_logout_response(&headers)
        .await
        .into_response_error()?;
    Ok((headers, Redirect::to(TTP_LOGIN_URL.as_str())))
}
