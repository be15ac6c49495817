use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use glossa_core::error::LookupError;
use glossa_store::StoreError;
use serde_json::json;

/// API errors mapped to status codes.
///
/// Internal detail strings are logged server-side only; the client always
/// gets either a full result or one generic error object.
#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    Unauthorized,
    Forbidden,
    NotFound(String),
    RateLimited { reset_at: DateTime<Utc> },
    Generation(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "authentication required" }),
            ),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, json!({ "error": "forbidden" })),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "error": message })),
            ApiError::RateLimited { reset_at } => (
                StatusCode::TOO_MANY_REQUESTS,
                json!({
                    "error": "rate limit exceeded",
                    "resetAt": reset_at.to_rfc3339(),
                }),
            ),
            ApiError::Generation(detail) => {
                tracing::error!("generation failed: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "failed to look up word" }),
                )
            }
            ApiError::Internal(detail) => {
                tracing::error!("internal error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<LookupError> for ApiError {
    fn from(error: LookupError) -> Self {
        match error {
            LookupError::Validation(message) => ApiError::Validation(message),
            LookupError::Generation(e) => ApiError::Generation(e.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(what) => ApiError::NotFound(what),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
