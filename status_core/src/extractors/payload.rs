//! Body extractor accepting either JSON or urlencoded form data

use axum::{
    async_trait,
    body::{Body, Bytes},
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Picks the JSON decoder for `application/json` (and `+json`) bodies and
/// the form decoder for everything else. A request without a content type,
/// or a JSON request with an empty body, decodes as an empty form.
pub struct JsonOrForm<T>(pub T);

enum BodyKind {
    Json,
    Form,
    Missing,
}

#[async_trait]
impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(&req) {
            BodyKind::Json => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
                if bytes.is_empty() {
                    return empty_form(state).await;
                }
                match Json::<T>::from_bytes(&bytes) {
                    Ok(Json(value)) => Ok(JsonOrForm(value)),
                    Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
                }
            }
            BodyKind::Form => match Form::<T>::from_request(req, state).await {
                Ok(Form(value)) => Ok(JsonOrForm(value)),
                Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
            },
            BodyKind::Missing => empty_form(state).await,
        }
    }
}

async fn empty_form<T, S>(state: &S) -> Result<JsonOrForm<T>, AppError>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    let mut req = Request::new(Body::empty());
    *req.method_mut() = Method::POST;
    req.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));

    match Form::<T>::from_request(req, state).await {
        Ok(Form(value)) => Ok(JsonOrForm(value)),
        Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
    }
}

fn body_kind(req: &Request) -> BodyKind {
    let Some(value) = req.headers().get(CONTENT_TYPE) else {
        return BodyKind::Missing;
    };

    let is_json = value
        .to_str()
        .ok()
        .and_then(|value| value.parse::<mime::Mime>().ok())
        .map(|mime| mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON))
        .unwrap_or(false);

    if is_json {
        BodyKind::Json
    } else {
        BodyKind::Form
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        email: String,
    }

    fn request(content_type: &str, body: &str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_extracts_json() {
        let req = request("application/json", r#"{"email":"a@b.com"}"#);
        let JsonOrForm(sample) = JsonOrForm::<Sample>::from_request(req, &()).await.unwrap();
        assert_eq!(sample.email, "a@b.com");
    }

    #[tokio::test]
    async fn test_extracts_form() {
        let req = request("application/x-www-form-urlencoded", "email=a%40b.com");
        let JsonOrForm(sample) = JsonOrForm::<Sample>::from_request(req, &()).await.unwrap();
        assert_eq!(sample.email, "a@b.com");
    }

    #[tokio::test]
    async fn test_missing_content_type_decodes_empty() {
        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let JsonOrForm(value) = JsonOrForm::<serde_json::Value>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_empty_json_body_decodes_empty() {
        let req = request("application/json", "");
        let JsonOrForm(value) = JsonOrForm::<serde_json::Value>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_missing_content_type_fails_required_fields() {
        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let result = JsonOrForm::<Sample>::from_request(req, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let req = request("application/json", "{not json");
        let result = JsonOrForm::<Sample>::from_request(req, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
