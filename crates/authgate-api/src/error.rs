//! Maps domain `AppError` to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use authgate_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// HTTP status code, repeated in the body.
    pub status_code: u16,
    /// Optional details, e.g. per-field validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// HTTP-layer wrapper around [`AppError`].
///
/// Handlers return `Result<_, ApiError>`; the `From` impl lets `?`
/// lift any domain error into a response.
#[derive(Debug, Clone)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// The HTTP status an [`ErrorKind`] maps to.
pub fn status_for_kind(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation | ErrorKind::UnknownRole => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::InvalidCredentials
        | ErrorKind::TokenMalformed
        | ErrorKind::TokenSignatureInvalid
        | ErrorKind::TokenExpired
        | ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::DuplicateEmail | ErrorKind::DuplicateName => StatusCode::CONFLICT,
        ErrorKind::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Internal | ErrorKind::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for_kind(err.kind);

        if status.is_server_error() {
            tracing::error!(kind = %err.kind, error = %err.message, "Request failed");
        }

        // Internal messages may carry driver details; never leak them.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            err.message
        };

        let body = ApiErrorResponse {
            error: err.kind.to_string(),
            message,
            status_code: status.as_u16(),
            details: err.details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for_kind(ErrorKind::Validation),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for_kind(ErrorKind::UnknownRole),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for_kind(ErrorKind::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for_kind(ErrorKind::TokenExpired),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for_kind(ErrorKind::DuplicateEmail),
            StatusCode::CONFLICT
        );
        assert_eq!(status_for_kind(ErrorKind::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            status_for_kind(ErrorKind::StoreUnavailable),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_internal_message_is_not_leaked() {
        let response =
            ApiError(AppError::internal("pg driver said something secret")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
