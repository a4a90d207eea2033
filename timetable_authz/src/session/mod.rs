mod config;
mod errors;
mod main;
mod types;

pub use config::SESSION_COOKIE_NAME; // Required for cookie configuration
pub use errors::SessionError;
pub use main::{
    create_session, destroy_session, issue_remember_token, prepare_logout_response,
    require_valid_session, revoke_remember_token, session_id_from_headers, validate_session,
};
pub use types::SessionInfo;

#[cfg(test)]
pub(crate) use types::StoredSession;
