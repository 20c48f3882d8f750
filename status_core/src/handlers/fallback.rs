//! Catch-all responses: unknown routes and handler panics

use axum::{
    body::Body,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::any::Any;
use tracing::{error, info};

use crate::error::{internal_error_response, timestamp_now};

pub async fn handle_not_found(method: Method, uri: Uri) -> impl IntoResponse {
    info!("Route not found: {} {}", method, uri);

    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Route not found",
            "method": method.as_str(),
            "url": uri.to_string(),
            "timestamp": timestamp_now(),
        })),
    )
}

pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    error!("Unhandled fault in request handler: {}", detail);
    internal_error_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::to_bytes, http::Request, routing::get, Router};
    use tower::ServiceExt;
    use tower_http::catch_panic::CatchPanicLayer;

    async fn exploding() -> &'static str {
        if std::env::consts::OS.is_empty() {
            return "unreachable";
        }
        panic!("secret handler state");
    }

    #[tokio::test]
    async fn test_handler_panic_becomes_json_500() {
        let app = Router::new()
            .route("/explode", get(exploding))
            .layer(CatchPanicLayer::custom(handle_panic));

        let request = Request::builder()
            .uri("/explode")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Internal server error");
        assert!(json["timestamp"].is_string());
        assert!(!json.to_string().contains("secret handler state"));
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = handle_not_found(Method::DELETE, Uri::from_static("/missing"))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["method"], "DELETE");
        assert_eq!(json["url"], "/missing");
    }
}
