//! Public read routes under `/api/v1`.

use crate::handlers::public::{
    content_detail, content_list, hero_slides, home, partners, quick_links, settings, statistics,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn public_routes(state: AppState) -> Router {
    Router::new()
        .route("/home", get(home))
        .route("/home/hero-slides", get(hero_slides))
        .route("/home/statistics", get(statistics))
        .route("/home/partners", get(partners))
        .route("/home/quick-links", get(quick_links))
        .route("/settings", get(settings))
        .route("/content/:segment", get(content_list))
        .route("/content/:segment/:key", get(content_detail))
        .with_state(state)
}
