//! # HTTP API Errors
//!
//! Maps engine failures onto status codes and a JSON error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::errors::EngineError;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Engine rejected the request or failed an invariant
    #[error("{0}")]
    Engine(#[from] EngineError),

    /// Body is not a decodable request
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Worker task failed
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            ApiError::Engine(EngineError::InvalidMethod(_)) => StatusCode::BAD_REQUEST,
            ApiError::Engine(EngineError::InvalidThreshold(_)) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,

            // 422 Unprocessable Entity
            ApiError::Engine(EngineError::MalformedTable { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            // 500 Internal Server Error
            ApiError::Engine(EngineError::InvariantViolation(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Engine(e) => e.code(),
            ApiError::InvalidBody(_) => "DT_INVALID_BODY",
            ApiError::Internal(_) => "DT_INTERNAL",
        }
    }

    /// Error kind name
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Engine(e) => e.kind(),
            ApiError::InvalidBody(_) => "invalid_body",
            ApiError::Internal(_) => "internal",
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        let object_id = match &err {
            ApiError::Engine(e) => e.object_id().map(String::from),
            _ => None,
        };
        Self {
            error: err.to_string(),
            code: err.code().to_string(),
            kind: err.kind().to_string(),
            object_id,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
