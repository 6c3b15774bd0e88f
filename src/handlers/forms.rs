//! Model descriptions and form descriptors for the back office.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::{Lang, RequireEditor};
use crate::form::{render_html, FormState, Widget};
use crate::locale::Locale;
use crate::model::ContentModel;
use crate::response::{success_many, success_one_ok};
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct ModelSummary {
    pub segment: String,
    pub title: String,
    pub public: bool,
    pub list_columns: Vec<String>,
}

impl ModelSummary {
    fn new(model: &ContentModel, locale: Locale) -> Self {
        ModelSummary {
            segment: model.segment.clone(),
            title: model.title(locale).to_string(),
            public: model.public,
            list_columns: model.list_columns.clone(),
        }
    }
}

pub async fn list_models(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Lang(locale): Lang,
) -> impl IntoResponse {
    let models = state.catalog.models.iter().map(|m| ModelSummary::new(m, locale)).collect();
    success_many(models)
}

pub async fn get_model(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let model = state.model(&segment)?.clone();
    Ok(success_one_ok(model))
}

#[derive(Deserialize)]
pub struct FormQuery {
    /// Prefill from this row.
    pub id: Option<String>,
    /// `html` for a rendered fragment, JSON descriptors otherwise.
    pub format: Option<String>,
}

#[derive(Serialize)]
pub struct FormDescriptor {
    pub segment: String,
    pub title: String,
    pub method: &'static str,
    pub action: String,
    pub widgets: Vec<Widget>,
}

pub async fn form(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Lang(locale): Lang,
    Path(segment): Path<String>,
    Query(query): Query<FormQuery>,
) -> Result<Response, AppError> {
    let model = state.model(&segment)?;
    let (form, method, action) = match query.id.as_deref() {
        Some(id_str) => {
            let id = parse_id(id_str)?;
            let row = CrudService::read(&state.pool, state.schema(), model, &id)
                .await?
                .ok_or_else(|| AppError::NotFound(id_str.to_string()))?;
            (
                FormState::from_row(model, &row),
                "patch",
                format!("/admin/api/{}/{}", segment, id_str),
            )
        }
        None => (FormState::new(), "post", format!("/admin/api/{}", segment)),
    };
    let widgets = form.widgets(model, locale);
    if query.format.as_deref() == Some("html") {
        return Ok(Html(render_html(&segment, &action, &widgets)).into_response());
    }
    Ok(success_one_ok(FormDescriptor {
        segment: segment.clone(),
        title: model.title(locale).to_string(),
        method,
        action,
        widgets,
    })
    .into_response())
}
