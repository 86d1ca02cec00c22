use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Provider API error: {0}")]
    Api(String),

    #[error("Unexpected response shape: {0}")]
    ResponseShape(String),

    #[error("No data available: {0}")]
    DataUnavailable(String),

    #[error("Report rendering error: {0}")]
    Render(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

/// Helper for mapping any unknown error into internal error
pub fn internal_error<E: ToString>(err: E) -> AppError {
    AppError::InternalServerError(err.to_string())
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Choose status codes per variant
        let status = match self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Http { .. } => StatusCode::BAD_GATEWAY,
            AppError::Api(_) => StatusCode::BAD_GATEWAY,
            AppError::ResponseShape(_) => StatusCode::BAD_GATEWAY,
            AppError::DataUnavailable(_) => StatusCode::NOT_FOUND,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // String provided by thiserror → safe JSON message
        let body = Json(json!({
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_keeps_original_status_in_message() {
        let err = AppError::Http {
            status: 403,
            body: "authentication error".into(),
        };
        assert_eq!(err.to_string(), "HTTP error 403: authentication error");
    }

    #[test]
    fn internal_error_wraps_message() {
        let err = internal_error("boom");
        assert!(matches!(err, AppError::InternalServerError(ref m) if m == "boom"));
    }
}
