//! Mapping from storage errors to HTTP responses.

use album_core::{RepoError, RepoErrorKind};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde::Serialize;

/// Error body returned by every failing route.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

/// Handler failure carrying the response status and message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        let status = match err.kind() {
            RepoErrorKind::NotFound => StatusCode::NOT_FOUND,
            RepoErrorKind::DuplicateId => StatusCode::CONFLICT,
            RepoErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            RepoErrorKind::BackendUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            RepoErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(
                "event=http_error module=server status=error http_status={} error_code={} error={}",
                status.as_u16(),
                err.code(),
                err
            );
        }
        Self::new(status, err.to_string())
    }
}

// Malformed bodies are always 400, whatever axum's own rejection status is.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message,
            code: self.status.as_u16(),
        };
        (self.status, Json(body)).into_response()
    }
}
