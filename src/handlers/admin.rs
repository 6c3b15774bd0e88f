//! Back office CRUD handlers: list, read, create, update, delete on any catalog model.

use super::{body_to_map, parse_id, ListQuery};
use crate::error::AppError;
use crate::extractors::{AuthUser, JsonBody, RequireAdmin, RequireEditor};
use crate::response::{success_many, success_one, success_one_ok};
use crate::service::{CrudService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;
use std::collections::HashMap;

pub async fn list(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(segment): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let model = state.model(&segment)?;
    let q = ListQuery::parse(model, params)?;
    let rows = CrudService::list(&state.pool, state.schema(), model, &q.filters, q.limit, q.offset).await?;
    Ok(success_many(rows))
}

pub async fn create(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(segment): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> Result<impl IntoResponse, AppError> {
    let model = state.model(&segment)?;
    let body = body_to_map(body)?;
    let body = RequestValidator::validate(model, &body).map_err(AppError::Validation)?;
    let row = CrudService::create(&state.pool, state.schema(), model, &body).await?;
    tracing::info!(user = %user.id, model = %segment, "content created");
    Ok(success_one(row))
}

pub async fn read(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path((segment, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let model = state.model(&segment)?;
    let id = parse_id(&id_str)?;
    let row = CrudService::read(&state.pool, state.schema(), model, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(id_str))?;
    Ok(success_one_ok(row))
}

pub async fn update(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path((segment, id_str)): Path<(String, String)>,
    JsonBody(body): JsonBody<Value>,
) -> Result<impl IntoResponse, AppError> {
    let model = state.model(&segment)?;
    let id = parse_id(&id_str)?;
    let body = body_to_map(body)?;
    let body = RequestValidator::validate_partial(model, &body).map_err(AppError::Validation)?;
    let row = CrudService::update(&state.pool, state.schema(), model, &id, &body)
        .await?
        .ok_or_else(|| AppError::NotFound(id_str))?;
    tracing::info!(user = %user.id, model = %segment, "content updated");
    Ok(success_one_ok(row))
}

pub async fn delete(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path((segment, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let model = state.model(&segment)?;
    let id = parse_id(&id_str)?;
    if !CrudService::delete(&state.pool, state.schema(), model, &id).await? {
        return Err(AppError::NotFound(id_str));
    }
    tracing::info!(user = %user.id, model = %segment, "content deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Current back office user.
pub async fn me(user: AuthUser) -> impl IntoResponse {
    success_one_ok(user)
}
