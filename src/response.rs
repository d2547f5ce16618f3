use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub type ApiResult<T> = Result<JsonApiResponse<T>, AppError>;

/// Envelope for every response body: `{status, message, data}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonApiResponse<T> {
    pub status: u16,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> JsonApiResponse<T> {
    pub fn ok(data: T) -> ApiResult<T> {
        Ok(Self {
            status: StatusCode::OK.as_u16(),
            message: "ok".to_string(),
            data,
        })
    }
}

impl JsonApiResponse<serde_json::Value> {
    pub(crate) fn from_error(err: &AppError) -> Self {
        Self {
            status: err.status().as_u16(),
            message: err.message().to_string(),
            data: serde_json::Value::Null,
        }
    }
}

pub(crate) fn log_app_error(err: &AppError) {
    match err {
        AppError::Store { message, source } => {
            tracing::error!(error = %source, "{message}");
        }
        AppError::Internal(message) => tracing::error!("{message}"),
        _ => tracing::debug!(status = err.status().as_u16(), "{}", err.message()),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        log_app_error(&self);
        JsonApiResponse::from_error(&self).into_response()
    }
}

impl<T: Serialize> IntoResponse for JsonApiResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
