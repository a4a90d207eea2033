use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum PrincipalError {
    #[error("Principal not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<serde_json::Error> for PrincipalError {
    fn from(err: serde_json::Error) -> Self {
        PrincipalError::InvalidData(err.to_string())
    }
}
