use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use thiserror::Error;

pub const KEY_NOT_FOUND: &str = "Key not found";

/// Errors a request handler can surface to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("key not found: {0}")]
    NotFound(String),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(key) => ApiError::NotFound(key),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody { error: KEY_NOT_FOUND.to_string() }),
            )
                .into_response(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}
