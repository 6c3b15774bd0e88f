//! JSON body extractor that rejects with the error envelope.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

/// Like [`axum::Json`], but a missing content type or malformed body is a 400
/// `bad_request` in the usual `{error}` shape.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(JsonBody(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, routing::post, Router};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route("/", post(|JsonBody(v): JsonBody<Value>| async move { Json(v) }))
    }

    async fn send(content_type: Option<&str>, body: &'static str) -> (StatusCode, Value) {
        let mut req = Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            req = req.header("content-type", ct);
        }
        let res = app().oneshot(req.body(Body::from(body)).unwrap()).await.unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn malformed_body_is_a_bad_request_envelope() {
        let (status, json) = send(Some("application/json"), "{\"title\": ").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "bad_request");
        assert_eq!(json["error"]["message_fr"], "Requête invalide");
    }

    #[tokio::test]
    async fn missing_content_type_is_a_bad_request_envelope() {
        let (status, json) = send(None, "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn valid_body_passes_through() {
        let (status, json) = send(Some("application/json"), "{\"title\":\"Plan\"}").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["title"], "Plan");
    }
}
