//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Client-visible failures: plain text plus a status code, nothing more.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
            ApiError::Internal(message) => {
                error!("Request failed: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}

impl From<stockroom_core::Error> for ApiError {
    fn from(err: stockroom_core::Error) -> Self {
        match err {
            stockroom_core::Error::NotFound(message) => ApiError::NotFound(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
