use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use filmqa::QaError;
use serde_json::json;
use tracing::error;

/// A custom error type for the server application.
///
/// Per-question failures are rendered as panels by the handlers and do not reach this
/// type; it covers the endpoints that return data rather than HTML.
pub enum AppError {
    /// Errors originating from `filmqa`.
    Qa(QaError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

/// Conversion from `QaError` to `AppError`.
impl From<QaError> for AppError {
    fn from(err: QaError) -> Self {
        AppError::Qa(err)
    }
}

/// Conversion from `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Qa(err) => {
                // Log the original error for debugging purposes
                error!("QaError: {:?}", err);
                let status = match &err {
                    QaError::KnowledgeBaseUnavailable(_) | QaError::Io(_) | QaError::Csv(_) => {
                        StatusCode::UNPROCESSABLE_ENTITY
                    }
                    QaError::EmptyQuestion | QaError::PromptTooLarge { .. } => {
                        StatusCode::BAD_REQUEST
                    }
                    QaError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                    e if e.is_invocation_error() => StatusCode::BAD_GATEWAY,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.to_string())
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
