use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant is terminal for the current generate action; nothing is retried.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No OpenAI API key available")]
    MissingCredential,

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Parse failure: {message}")]
    ParseFailure { message: String, raw_text: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// A body that fails to decode (bad JSON, a value that does not fit its field)
/// is reported like any other invalid input.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::MissingCredential => (
                StatusCode::UNAUTHORIZED,
                "MISSING_CREDENTIAL",
                "Provide an OpenAI API key via the X-OpenAI-Key header or OPENAI_API_KEY"
                    .to_string(),
            ),
            AppError::Provider(msg) => {
                tracing::error!("Provider error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PROVIDER_ERROR",
                    format!("OpenAI API error: {msg}"),
                )
            }
            AppError::ParseFailure { message, .. } => {
                tracing::warn!("Parse failure: {message}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PARSE_FAILURE",
                    "Failed to parse the model response as JSON".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let AppError::ParseFailure { raw_text, .. } = &self {
            error["raw_text"] = json!(raw_text);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
