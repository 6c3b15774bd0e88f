#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;
use urbanisme_cms::config::JwtConfig;
use urbanisme_cms::{app, AppConfig, AppState, Catalog};

pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Configuration with safe defaults; the database URL is never dialed by lazy pools.
pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://localhost/urbanisme_test".to_string(),
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            audience: "authenticated".to_string(),
        },
        host: "127.0.0.1".to_string(),
        port: 0,
        max_connections: 1,
        content_schema: "public".to_string(),
        login_path: "/login".to_string(),
        body_limit_bytes: 64 * 1024,
        models_path: None,
    }
}

pub fn build_app(pool: PgPool) -> Router {
    let catalog = Catalog::builtin("public").unwrap();
    app(AppState::new(pool, catalog, test_config()))
}

/// App over a pool that never connects, for requests rejected before any query.
pub fn build_offline_app() -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/urbanisme_test")
        .unwrap();
    build_app(pool)
}

/// Signed token for `sub`, expiring `exp_offset` seconds from now.
pub fn token(sub: uuid::Uuid, exp_offset: i64) -> String {
    let claims = json!({
        "sub": sub,
        "exp": chrono::Utc::now().timestamp() + exp_offset,
        "aud": "authenticated",
        "email": "agent@urbanisme.gouv.sn",
    });
    encode(&Header::default(), &claims, &EncodingKey::from_secret(TEST_SECRET.as_bytes())).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
