//! Public read handlers: home page sections, site settings and published content.

use super::{parse_id, ListQuery};
use crate::cms::CmsService;
use crate::error::AppError;
use crate::extractors::Lang;
use crate::model::ContentModel;
use crate::response::{success_many, success_one_ok};
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde_json::Value;
use std::collections::HashMap;

pub async fn home(State(state): State<AppState>, Lang(locale): Lang) -> Result<impl IntoResponse, AppError> {
    let page = CmsService::home_page(&state.pool, state.schema(), locale).await?;
    Ok(success_one_ok(page))
}

pub async fn hero_slides(State(state): State<AppState>, Lang(locale): Lang) -> impl IntoResponse {
    success_one_ok(CmsService::hero_slides(&state.pool, state.schema(), locale).await)
}

pub async fn statistics(State(state): State<AppState>, Lang(locale): Lang) -> impl IntoResponse {
    success_one_ok(CmsService::statistics(&state.pool, state.schema(), locale).await)
}

pub async fn partners(State(state): State<AppState>) -> impl IntoResponse {
    success_one_ok(CmsService::partners(&state.pool, state.schema()).await)
}

pub async fn quick_links(State(state): State<AppState>, Lang(locale): Lang) -> impl IntoResponse {
    success_one_ok(CmsService::quick_links(&state.pool, state.schema(), locale).await)
}

pub async fn settings(State(state): State<AppState>, Lang(locale): Lang) -> Result<impl IntoResponse, AppError> {
    Ok(success_one_ok(CmsService::site_settings(&state.pool, state.schema(), locale).await?))
}

pub async fn content_list(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let model = state
        .catalog
        .public_model(&segment)
        .ok_or_else(|| AppError::NotFound(segment.clone()))?;
    let q = ListQuery::parse(model, params)?;
    let rows = CrudService::list(&state.pool, state.schema(), model, &q.filters, q.limit, q.offset).await?;
    Ok(success_many(rows))
}

/// How a detail URL addresses its row.
#[derive(Debug, PartialEq)]
pub(crate) enum DetailKey {
    Slug(String),
    Id(Value),
}

impl DetailKey {
    /// Slug when the model declares one, id otherwise.
    pub fn for_model(model: &ContentModel, key: &str) -> Result<Self, AppError> {
        match model.slug_field {
            Some(_) => Ok(DetailKey::Slug(key.to_string())),
            None => parse_id(key).map(DetailKey::Id),
        }
    }
}

pub async fn content_detail(
    State(state): State<AppState>,
    Path((segment, key)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let model = state
        .catalog
        .public_model(&segment)
        .ok_or_else(|| AppError::NotFound(segment.clone()))?;
    let row = match DetailKey::for_model(model, &key)? {
        DetailKey::Slug(slug) => CrudService::find_by_slug(&state.pool, state.schema(), model, &slug).await?,
        DetailKey::Id(id) => CrudService::read(&state.pool, state.schema(), model, &id).await?,
    }
    .ok_or_else(|| AppError::NotFound(key))?;
    Ok(success_one_ok(row))
}
