//! API error types and conversions

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use omni_core::GatewayError;
use serde::Serialize;

/// API error type that converts to HTTP responses.
///
/// Backend faults never reach this layer, so the only caller-visible
/// failure is an unknown store.
#[derive(Debug)]
pub enum ApiError {
    /// 404 Not Found
    NotFound(String),
}

/// Standard error response format
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
        };

        tracing::debug!(error = error_type, %message, "API client error");

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::StoreNotFound(_) => ApiError::NotFound(err.to_string()),
        }
    }
}
