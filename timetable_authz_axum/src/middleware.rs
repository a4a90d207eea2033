use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use timetable_authz::{AuthFailure, Role, require_role, require_valid_session};

use super::session::{AuthPrincipal, AuthRedirect};

// Helper function to turn an authorization failure into a response
fn handle_auth_failure(failure: AuthFailure, req: &Request) -> Response {
    AuthRedirect::new(failure, req.method().clone(), req.uri().path().to_string()).into_response()
}

/// Middleware that requires a valid session
///
/// On success the [`AuthPrincipal`] snapshot is inserted into request
/// extensions for downstream handlers. On failure, GET requests are
/// redirected to the login surface and other methods receive 401.
pub async fn require_session(mut req: Request, next: Next) -> Response {
    match require_valid_session(req.headers()).await {
        Ok(session) => {
            req.extensions_mut().insert(AuthPrincipal::from(session));
            next.run(req).await
        }
        Err(failure) => handle_auth_failure(failure, &req),
    }
}

async fn require_listed_role(mut req: Request, next: Next, allowed: &[Role]) -> Response {
    match require_role(req.headers(), allowed).await {
        Ok(session) => {
            req.extensions_mut().insert(AuthPrincipal::from(session));
            next.run(req).await
        }
        Err(failure) => handle_auth_failure(failure, &req),
    }
}

/// Middleware that admits students only
pub async fn student_only(req: Request, next: Next) -> Response {
    require_listed_role(req, next, &[Role::Student]).await
}

/// Middleware that admits faculty only
pub async fn faculty_only(req: Request, next: Next) -> Response {
    require_listed_role(req, next, &[Role::Faculty]).await
}

/// Middleware that admits department admins only
///
/// Super admins are not admitted implicitly; list them with
/// [`admin_or_super_admin`] where that is intended.
pub async fn admin_only(req: Request, next: Next) -> Response {
    require_listed_role(req, next, &[Role::Admin]).await
}

/// Middleware that admits department admins and super admins
pub async fn admin_or_super_admin(req: Request, next: Next) -> Response {
    require_listed_role(req, next, &[Role::Admin, Role::SuperAdmin]).await
}

/// Middleware that admits super admins only
pub async fn super_admin_only(req: Request, next: Next) -> Response {
    require_listed_role(req, next, &[Role::SuperAdmin]).await
}
