pub mod handlers;
pub mod responses;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Uniform error response body.
///
/// Every non-validation failure renders as a single-field JSON object:
///
/// ```json
/// {"error": "Task not found for id: 42"}
/// ```
///
/// Validation failures instead render as a field-to-message mapping, e.g.
/// `{"title": "Title must be between 3 and 75 characters"}`.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Application error type that converts into HTTP responses.
///
/// Domain error enums convert into this at the transport boundary; it also
/// absorbs common failures from the extractor and persistence layers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

/// Flatten `validator` errors into a field → message JSON object.
///
/// Only the first violation per field is reported; the message falls back to
/// the constraint code when a violation carries no message.
fn validation_details(errors: &ValidationErrors) -> serde_json::Map<String, serde_json::Value> {
    errors
        .field_errors()
        .iter()
        .map(|(field, violations)| {
            let message = violations
                .first()
                .and_then(|v| v.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| format!("Invalid value for field '{}'", field));
            (field.to_string(), serde_json::Value::String(message))
        })
        .collect()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::info!("JSON extraction error: {:?}", e);
                // Missing and malformed bodies alike are the client's fault
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(e.body_text())),
                )
                    .into_response()
            }
            AppError::ValidationError(e) => {
                tracing::info!("Validation error: {}", e);
                let details = validation_details(&e);
                (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::Value::Object(details)),
                )
                    .into_response()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("An unexpected error occurred")),
                )
                    .into_response()
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response()
            }
            AppError::NotFound(msg) => {
                tracing::info!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, Json(ErrorResponse::new(msg))).into_response()
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(msg)),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 3, message = "too short"))]
        name: String,
    }

    #[test]
    fn test_validation_details_uses_message() {
        let probe = Probe {
            name: "ab".to_string(),
        };
        let errors = probe.validate().unwrap_err();
        let details = validation_details(&errors);

        assert_eq!(
            details.get("name").and_then(|v| v.as_str()),
            Some("too short")
        );
    }

    #[tokio::test]
    async fn test_not_found_renders_error_field() {
        use http_body_util::BodyExt;

        let response = AppError::NotFound("Task not found for id: 7".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Task not found for id: 7");
    }
}
