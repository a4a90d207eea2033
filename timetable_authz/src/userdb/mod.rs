mod errors;
mod principal;
mod types;

pub use errors::PrincipalError;
pub use principal::PrincipalStore;
pub use types::{Principal, PrincipalStatus};

pub(crate) async fn init() -> Result<(), PrincipalError> {
    PrincipalStore::init().await
}
