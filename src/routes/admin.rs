//! Back office routes under `/admin/api`. Static prefixes take priority over `/:segment`.

use crate::handlers::admin::{create, delete as delete_handler, list, me, read, update};
use crate::handlers::diagnostics::{repair, schema_report};
use crate::handlers::forms::{form, get_model, list_models};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn admin_routes(state: AppState) -> Router {
    Router::new()
        .route("/me", get(me))
        .route("/models", get(list_models))
        .route("/models/:segment", get(get_model))
        .route("/models/:segment/form", get(form))
        .route("/diagnostics/schema", get(schema_report))
        .route("/diagnostics/repair", post(repair))
        .route("/:segment", get(list).post(create))
        .route("/:segment/:id", get(read).patch(update).delete(delete_handler))
        .with_state(state)
}
