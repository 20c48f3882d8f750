//! Application error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Page unavailable: {0}")]
    PageUnavailable(String),

    #[error("Failed to check database: {0}")]
    DatabaseCheck(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Environment error: {0}")]
    Environment(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// RFC 3339 UTC timestamp with millisecond precision, used in every JSON body.
pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// The `{error, message, timestamp}` shape shared by all 500 JSON responses.
pub fn error_body(error: &str, message: &str) -> Json<serde_json::Value> {
    Json(json!({
        "error": error,
        "message": message,
        "timestamp": timestamp_now(),
    }))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::PageUnavailable(page) => {
                tracing::error!("Failed to load page: {}", page);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("{} is not available right now", page),
                )
                    .into_response()
            }
            AppError::DatabaseCheck(msg) => {
                tracing::error!("Database check faulted: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_body(
                        "Failed to check database",
                        "The database status could not be determined",
                    ),
                )
                    .into_response()
            }
            AppError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                internal_error_response()
            }
            AppError::Environment(msg) => {
                tracing::error!("Environment error: {}", msg);
                internal_error_response()
            }
            AppError::Config(err) => {
                tracing::error!("Configuration error: {:?}", err);
                internal_error_response()
            }
            AppError::IoError(err) => {
                tracing::error!("IO error: {:?}", err);
                internal_error_response()
            }
            AppError::Other(err) => {
                tracing::error!("Unexpected error: {:?}", err);
                internal_error_response()
            }
        }
    }
}

pub(crate) fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error_body(
            "Internal server error",
            "The server encountered an unexpected condition",
        ),
    )
        .into_response()
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_bad_request_is_plain_text() {
        let response =
            AppError::BadRequest("Email and password are required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Email and password are required");
    }

    #[tokio::test]
    async fn test_internal_errors_hide_details() {
        let response =
            AppError::Database("disk I/O error at /var/lib/db".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Internal server error");
        assert!(json["timestamp"].is_string());
        assert!(!body.windows(8).any(|w| w == b"/var/lib"));
    }

    #[tokio::test]
    async fn test_database_check_error_shape() {
        let response = AppError::DatabaseCheck("panicked at connection.rs:42".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Failed to check database");
        assert_eq!(json["message"], "The database status could not be determined");
        assert!(!json.to_string().contains("connection.rs"));
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp_now();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
