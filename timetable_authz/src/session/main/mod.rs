mod cookie;
mod session;

pub use session::{
    create_session, destroy_session, issue_remember_token, prepare_logout_response,
    require_valid_session, revoke_remember_token, session_id_from_headers, validate_session,
};
