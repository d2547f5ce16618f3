use crate::schema::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Rejected by the shared input constraint or by the server's schema check.
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Errors the user can act on, as opposed to the backend being unusable.
    pub fn is_expected(&self) -> bool {
        matches!(self, ClientError::Validation(_) | ClientError::NotFound(_))
    }
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Validation(err.message)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
