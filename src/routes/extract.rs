use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON body decoded into a procedure input. Any decode failure, including a
/// field that breaks its constraint, is a validation error and the handler
/// never runs.
#[derive(Debug, Clone)]
pub struct RpcInput<T>(pub T);

impl<S, T> FromRequest<S> for RpcInput<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::validation(rejection.body_text())),
        }
    }
}
