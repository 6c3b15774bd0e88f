//! Router assembly.

mod admin;
mod common;
mod public;

pub use admin::admin_routes;
pub use common::common_routes;
pub use public::public_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application: common routes, public API under `/api/v1`, back office under `/admin/api`.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.body_limit_bytes;
    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api/v1", public_routes(state.clone()))
        .nest("/admin/api", admin_routes(state))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
}
