use authgate_sdk::ClientError;
use thiserror::Error;

use crate::application::validators::FieldErrors;

/// Failure as seen by the auth flows and the command line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Invalid input: {0}")]
    Validation(FieldErrors),

    #[error("{0}")]
    Message(String),

    #[error("Unknown error")]
    Unknown,
}

impl AppError {
    pub fn is_auth_required(&self) -> bool {
        matches!(self, AppError::Client(ClientError::AuthRequired))
    }
}

pub type AppResult<T> = Result<T, AppError>;
