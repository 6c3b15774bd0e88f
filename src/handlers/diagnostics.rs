//! Admin-only maintenance: schema report and repair.

use crate::error::AppError;
use crate::extractors::RequireAdmin;
use crate::response::success_one_ok;
use crate::schema;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn schema_report(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let report = schema::check(&state.pool, &state.catalog).await?;
    Ok(success_one_ok(report))
}

pub async fn repair(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(user = %user.id, "schema repair requested");
    let report = schema::repair(&state.pool, &state.catalog).await?;
    Ok(success_one_ok(report))
}
