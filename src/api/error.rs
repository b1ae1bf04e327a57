use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::OperationResult;
use crate::store::StoreError;

/// Failure of a request, rendered through [`OperationResult`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested character does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Malformed identifier or input. Never reaches the store.
    #[error("{0}")]
    Validation(String),
    /// Anything else. The detail is logged, clients only see a generic message.
    #[error("{0}")]
    Unexpected(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn validation(description: impl Into<String>) -> Self {
        ApiError::Validation(description.into())
    }

    pub fn unexpected(detail: impl std::fmt::Display) -> Self {
        ApiError::Unexpected(detail.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound("Character not found".to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (description, detail) = match self {
            ApiError::Unexpected(detail) => ("Internal server error".to_string(), Some(detail)),
            ApiError::NotFound(description) | ApiError::Validation(description) => {
                (description, None)
            }
        };

        let body = OperationResult::failure(status, &description);
        match detail {
            Some(detail) => tracing::error!(
                status = status.as_u16(),
                message = %body.message,
                error = %detail,
                "Character operation failed"
            ),
            None => tracing::error!(
                status = status.as_u16(),
                message = %body.message,
                "Character operation failed"
            ),
        }

        (status, Json(body)).into_response()
    }
}
