//! Initial content: copies the static home page sections into empty tables.

use crate::cms::fallback;
use crate::error::AppError;
use crate::locale::Locale;
use crate::model::{Catalog, ContentModel};
use crate::service::{CrudService, RequestValidator};
use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;
use std::collections::{BTreeMap, HashMap};

/// Rows inserted per model segment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub inserted: BTreeMap<String, usize>,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.inserted.values().sum()
    }
}

/// Fallback item as a create body: no id, no nulls, active.
fn to_body<T: Serialize>(item: &T) -> HashMap<String, Value> {
    let mut body: HashMap<String, Value> = match serde_json::to_value(item) {
        Ok(Value::Object(map)) => map.into_iter().filter(|(k, v)| k != "id" && !v.is_null()).collect(),
        _ => HashMap::new(),
    };
    body.insert("is_active".to_string(), Value::Bool(true));
    body
}

async fn insert_all(
    pool: &PgPool,
    schema: &str,
    model: &ContentModel,
    bodies: Vec<HashMap<String, Value>>,
) -> Result<usize, AppError> {
    let mut n = 0;
    for body in bodies {
        let body = RequestValidator::validate(model, &body).map_err(AppError::Validation)?;
        CrudService::create(pool, schema, model, &body).await?;
        n += 1;
    }
    Ok(n)
}

async fn seed_section<T: Serialize>(
    pool: &PgPool,
    catalog: &Catalog,
    segment: &str,
    items: Vec<T>,
    report: &mut SeedReport,
) -> Result<(), AppError> {
    let Some(model) = catalog.model(segment) else {
        tracing::warn!(segment, "model not in catalog, skipping seed");
        return Ok(());
    };
    if CrudService::count(pool, &catalog.schema, model).await? > 0 {
        tracing::info!(segment, "table not empty, skipping seed");
        return Ok(());
    }
    let bodies = items.iter().map(to_body).collect();
    let n = insert_all(pool, &catalog.schema, model, bodies).await?;
    report.inserted.insert(segment.to_string(), n);
    Ok(())
}

/// Seed empty home page tables and add missing site settings. Never overwrites existing rows.
pub async fn seed(pool: &PgPool, catalog: &Catalog, locale: Locale) -> Result<SeedReport, AppError> {
    let mut report = SeedReport::default();
    seed_section(pool, catalog, "hero-slides", fallback::hero_slides(locale), &mut report).await?;
    seed_section(pool, catalog, "statistics", fallback::statistics(locale), &mut report).await?;
    seed_section(pool, catalog, "partners", fallback::partners(), &mut report).await?;
    seed_section(pool, catalog, "quick-links", fallback::quick_links(locale), &mut report).await?;

    if let Some(model) = catalog.model("site-settings") {
        let mut bodies = Vec::new();
        for (key, value) in fallback::site_settings(locale) {
            let existing = CrudService::list(
                pool,
                &catalog.schema,
                model,
                &[("key".to_string(), Value::String(key.to_string()))],
                Some(1),
                None,
            )
            .await?;
            if existing.is_empty() {
                bodies.push(HashMap::from([
                    ("key".to_string(), Value::String(key.to_string())),
                    ("value".to_string(), Value::String(value.to_string())),
                ]));
            }
        }
        let n = insert_all(pool, &catalog.schema, model, bodies).await?;
        report.inserted.insert(model.segment.clone(), n);
    }

    tracing::info!(total = report.total(), "seed finished");
    Ok(report)
}
