use axum::http::StatusCode;
use sea_orm::DbErr;

use crate::db::dao::DaoLayerError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Input failed its schema before reaching a handler.
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// Transport-level rejection such as an unknown route or method.
    #[error("{0}")]
    BadRequest(String),
    /// Persistence failure. The message is safe to show; `source` is only logged.
    #[error("{message}")]
    Store {
        message: String,
        #[source]
        source: DbErr,
    },
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn store(message: impl Into<String>, source: DbErr) -> Self {
        Self::Store {
            message: message.into(),
            source,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message)
            | Self::NotFound(message)
            | Self::BadRequest(message)
            | Self::Internal(message) => message.as_str(),
            Self::Store { message, .. } => message.as_str(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Keeps a missing id as NotFound; any other store failure gets
    /// `failure_message` and keeps the cause as its source.
    pub fn from_dao(failure_message: &str, err: DaoLayerError) -> Self {
        match err {
            DaoLayerError::NotFound { .. } => Self::not_found(err.to_string()),
            DaoLayerError::Db(source) => Self::store(failure_message, source),
        }
    }

    /// Rebuilds an error from a status produced outside the handlers.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::not_found(message),
            StatusCode::UNPROCESSABLE_ENTITY => Self::validation(message),
            _ if status.is_client_error() => Self::bad_request(message),
            _ => Self::internal(message),
        }
    }
}
