//! Back office gate and public routes that answer without touching the database.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::{body_json, build_offline_app, get, send, token};

fn request(method: Method, uri: &str, headers: &[(header::HeaderName, &str)]) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(name, *value);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn browser_without_session_is_redirected_to_login() {
    let response = send(
        build_offline_app(),
        request(Method::GET, "/admin/api/projects", &[(header::ACCEPT, "text/html,application/xhtml+xml")]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/login?redirect=%2Fadmin%2Fapi%2Fprojects"
    );
}

#[tokio::test]
async fn redirect_keeps_the_full_requested_url() {
    let response = send(
        build_offline_app(),
        request(
            Method::GET,
            "/admin/api/models/projects/form?format=html",
            &[(header::ACCEPT, "text/html")],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/login?redirect=%2Fadmin%2Fapi%2Fmodels%2Fprojects%2Fform%3Fformat%3Dhtml"
    );
}

#[tokio::test]
async fn api_client_without_token_gets_401_json() {
    let response = send(
        build_offline_app(),
        request(Method::GET, "/admin/api/news", &[(header::ACCEPT, "application/json")]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "unauthorized");
    assert_eq!(json["error"]["message_fr"], "Veuillez vous connecter");
}

#[tokio::test]
async fn expired_or_forged_tokens_are_rejected() {
    let expired = format!("Bearer {}", token(uuid::Uuid::new_v4(), -300));
    let response = send(
        build_offline_app(),
        request(Method::DELETE, &format!("/admin/api/projects/{}", uuid::Uuid::new_v4()), &[(header::AUTHORIZATION, expired.as_str())]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let cookie = "access_token=not-a-jwt";
    let response = send(
        build_offline_app(),
        request(
            Method::POST,
            "/admin/api/diagnostics/repair",
            &[(header::COOKIE, cookie), (header::ACCEPT, "text/html")],
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/login?redirect=%2Fadmin%2Fapi%2Fdiagnostics%2Frepair"
    );
}

#[tokio::test]
async fn health_and_version_answer_without_database() {
    let response = get(build_offline_app(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");

    let response = get(build_offline_app(), "/version").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "urbanisme-cms");
}

#[tokio::test]
async fn only_public_models_are_exposed_as_content() {
    let response = get(build_offline_app(), "/api/v1/content/hero-slides").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"]["code"], "not_found");

    let response = get(build_offline_app(), "/api/v1/content/profiles/admin").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_list_parameters_are_rejected_before_querying() {
    let response = get(build_offline_app(), "/api/v1/content/projects?limit=beaucoup").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(build_offline_app(), "/api/v1/content/tenders?status=inconnu").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["message_fr"], "Requête invalide");
}
