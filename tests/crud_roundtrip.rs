//! Database-backed tests. Run with `DATABASE_URL` set: `cargo test -- --ignored`.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::{body_json, build_app, get, send, token};
use serde_json::{json, Value};
use sqlx::PgPool;
use std::collections::HashMap;
use urbanisme_cms::model::builtin;
use urbanisme_cms::service::RequestValidator;
use urbanisme_cms::{schema, seed, Catalog, CrudService, Locale};

async fn prepared(pool: &PgPool) -> Catalog {
    let catalog = Catalog::builtin("public").unwrap();
    let report = schema::repair(pool, &catalog).await.unwrap();
    assert!(report.is_healthy(), "{:?}", report);
    catalog
}

async fn session_token(pool: &PgPool, role: &str) -> String {
    let id = uuid::Uuid::new_v4();
    sqlx::query("INSERT INTO public.profiles (id, full_name, role) VALUES ($1, $2, $3)")
        .bind(id)
        .bind("Awa Ndiaye")
        .bind(role)
        .execute(pool)
        .await
        .unwrap();
    format!("Bearer {}", token(id, 900))
}

fn json_request(method: Method, uri: &str, auth: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, auth)
        .header(header::CONTENT_TYPE, "application/json");
    match body {
        Some(b) => builder.body(Body::from(b.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[sqlx::test(migrations = false)]
#[ignore]
async fn created_row_is_listed_with_submitted_values(pool: PgPool) {
    let catalog = prepared(&pool).await;
    let model = catalog.model("projects").unwrap();
    let submitted: HashMap<String, Value> = [
        ("title", json!("Restructuration urbaine de Pikine")),
        ("slug", json!("restructuration-pikine")),
        ("status", json!("planned")),
        ("budget", json!(1500000)),
        ("start_date", json!("2025-03-01")),
        ("is_featured", json!(true)),
        ("location", json!("Pikine, Dakar")),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();
    let body = RequestValidator::validate(model, &submitted).unwrap();

    let created = CrudService::create(&pool, "public", model, &body).await.unwrap();
    let rows = CrudService::list(&pool, "public", model, &[], None, None).await.unwrap();
    let listed = rows.iter().find(|r| r["id"] == created["id"]).unwrap();
    for (k, v) in &submitted {
        assert_eq!(&listed[k], v, "{}", k);
    }
}

#[sqlx::test(migrations = false)]
#[ignore]
async fn deleted_row_is_no_longer_listed(pool: PgPool) {
    let catalog = prepared(&pool).await;
    let model = catalog.model("partners").unwrap();
    let body = HashMap::from([("name".to_string(), json!("ONU-Habitat"))]);
    let created = CrudService::create(&pool, "public", model, &body).await.unwrap();

    assert!(CrudService::delete(&pool, "public", model, &created["id"]).await.unwrap());
    let rows = CrudService::list(&pool, "public", model, &[], None, None).await.unwrap();
    assert!(rows.iter().all(|r| r["id"] != created["id"]));
    assert!(!CrudService::delete(&pool, "public", model, &created["id"]).await.unwrap());
}

#[sqlx::test(migrations = false)]
#[ignore]
async fn empty_home_tables_serve_fallback_until_seeded(pool: PgPool) {
    let catalog = prepared(&pool).await;

    let json = body_json(get(build_app(pool.clone()), "/api/v1/home?lang=en").await).await;
    assert_eq!(json["data"]["hero_slides"]["source"], "fallback");
    assert_eq!(json["data"]["partners"]["source"], "fallback");
    assert_eq!(json["data"]["featured_news"]["items"], json!([]));

    let report = seed::seed(&pool, &catalog, Locale::Fr).await.unwrap();
    assert!(report.total() > 0);
    let again = seed::seed(&pool, &catalog, Locale::Fr).await.unwrap();
    assert_eq!(again.inserted.get("hero-slides"), None);

    let json = body_json(get(build_app(pool.clone()), "/api/v1/home/hero-slides").await).await;
    assert_eq!(json["data"]["source"], "backend");
    let n = CrudService::count(&pool, "public", &builtin::hero_slides()).await.unwrap();
    assert_eq!(json["data"]["items"].as_array().unwrap().len() as i64, n);
}

#[sqlx::test(migrations = false)]
#[ignore]
async fn back_office_crud_over_http(pool: PgPool) {
    prepared(&pool).await;
    let editor = session_token(&pool, "editor").await;
    let admin = session_token(&pool, "admin").await;

    let invalid = send(
        build_app(pool.clone()),
        json_request(Method::POST, "/admin/api/tenders", &editor, Some(json!({ "title": "Voirie" }))),
    )
    .await;
    assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let errors = body_json(invalid).await;
    let fields: Vec<&str> = errors["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["reference", "status", "submission_deadline"]);

    let created = send(
        build_app(pool.clone()),
        json_request(
            Method::POST,
            "/admin/api/tenders",
            &editor,
            Some(json!({
                "reference": "AO-2025-014",
                "title": "Travaux de voirie à Diamniadio",
                "status": "Ouvert",
                "submission_deadline": "2025-06-30",
            })),
        ),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let row = body_json(created).await["data"].clone();
    assert_eq!(row["status"], "open");
    let uri = format!("/admin/api/tenders/{}", row["id"].as_str().unwrap());

    let refused = send(build_app(pool.clone()), json_request(Method::DELETE, &uri, &editor, None)).await;
    assert_eq!(refused.status(), StatusCode::FORBIDDEN);

    let deleted = send(build_app(pool.clone()), json_request(Method::DELETE, &uri, &admin, None)).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    let missing = send(build_app(pool.clone()), json_request(Method::DELETE, &uri, &admin, None)).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = false)]
#[ignore]
async fn duplicate_slug_is_a_conflict(pool: PgPool) {
    prepared(&pool).await;
    let editor = session_token(&pool, "editor").await;
    let project = json!({
        "title": "Pôle urbain de Diamniadio",
        "slug": "pole-urbain-diamniadio",
        "status": "in_progress",
    });

    let first = send(
        build_app(pool.clone()),
        json_request(Method::POST, "/admin/api/projects", &editor, Some(project.clone())),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = send(
        build_app(pool.clone()),
        json_request(Method::POST, "/admin/api/projects", &editor, Some(project)),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["error"]["code"], "conflict");
    assert!(json["error"]["message"].as_str().unwrap().contains("projects_slug_key"));
}

#[sqlx::test(migrations = false)]
#[ignore]
async fn tender_detail_is_served_by_id(pool: PgPool) {
    let catalog = prepared(&pool).await;
    let model = catalog.model("tenders").unwrap();
    let body = RequestValidator::validate(
        model,
        &HashMap::from([
            ("reference".to_string(), json!("AO-2025-021")),
            ("title".to_string(), json!("Assainissement de Keur Massar")),
            ("status".to_string(), json!("open")),
            ("submission_deadline".to_string(), json!("2025-09-15")),
        ]),
    )
    .unwrap();
    let created = CrudService::create(&pool, "public", model, &body).await.unwrap();
    let id = created["id"].as_str().unwrap();

    let res = get(build_app(pool.clone()), &format!("/api/v1/content/tenders/{}", id)).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["data"]["reference"], "AO-2025-021");

    let res = get(
        build_app(pool.clone()),
        &format!("/api/v1/content/tenders/{}", uuid::Uuid::new_v4()),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = false)]
#[ignore]
async fn home_page_survives_a_missing_section_table(pool: PgPool) {
    prepared(&pool).await;
    sqlx::query("DROP TABLE public.quick_links").execute(&pool).await.unwrap();

    let res = get(build_app(pool.clone()), "/api/v1/home").await;
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["data"]["quick_links"]["source"], "fallback");
    assert!(!json["data"]["quick_links"]["items"].as_array().unwrap().is_empty());
}
