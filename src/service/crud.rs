//! Generic CRUD execution against the hosted PostgreSQL backend.

use crate::error::AppError;
use crate::model::ContentModel;
use crate::sql::{self, PgBindValue, QueryBuf};
use serde_json::Value;
use sqlx::PgPool;
use std::collections::HashMap;

/// Default list page size.
pub const DEFAULT_LIMIT: u32 = 100;

pub struct CrudService;

impl CrudService {
    /// List rows with optional filters (exact match), limit (default 100, max 1000), offset (default 0).
    pub async fn list(
        pool: &PgPool,
        schema: &str,
        model: &ContentModel,
        filters: &[(String, Value)],
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Value>, AppError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).min(sql::MAX_LIMIT);
        let offset = offset.unwrap_or(0);
        let q = sql::select_list(model, schema, filters, Some(limit), Some(offset));
        Self::query_many(pool, &q).await
    }

    /// Fetch one row by id. Returns JSON object or None.
    pub async fn read(
        pool: &PgPool,
        schema: &str,
        model: &ContentModel,
        id: &Value,
    ) -> Result<Option<Value>, AppError> {
        let mut q = sql::select_by_id(model, schema);
        q.params.push(id.clone());
        Self::query_optional(pool, &q).await
    }

    /// Fetch one row by the model's slug field.
    pub async fn find_by_slug(
        pool: &PgPool,
        schema: &str,
        model: &ContentModel,
        slug: &str,
    ) -> Result<Option<Value>, AppError> {
        let column = model
            .slug_field
            .as_deref()
            .ok_or_else(|| AppError::BadRequest(format!("{} has no slug lookup", model.segment)))?;
        let q = sql::select_by_column(model, schema, column, Value::String(slug.to_string()));
        Self::query_optional(pool, &q).await
    }

    /// Insert one row from an already validated body. Returns created row.
    pub async fn create(
        pool: &PgPool,
        schema: &str,
        model: &ContentModel,
        body: &HashMap<String, Value>,
    ) -> Result<Value, AppError> {
        let q = sql::insert(model, schema, body);
        let row = Self::query_optional(pool, &q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
        tracing::info!(model = %model.segment, id = %row["id"], "created");
        Ok(row)
    }

    /// Update one row by id. Returns updated row, None when the id does not exist.
    pub async fn update(
        pool: &PgPool,
        schema: &str,
        model: &ContentModel,
        id: &Value,
        body: &HashMap<String, Value>,
    ) -> Result<Option<Value>, AppError> {
        let q = sql::update(model, schema, id, body);
        let row = Self::query_optional(pool, &q).await?;
        if row.is_some() {
            tracing::info!(model = %model.segment, id = %id, "updated");
        }
        Ok(row)
    }

    /// Delete one row by id. Returns false when nothing was deleted.
    pub async fn delete(
        pool: &PgPool,
        schema: &str,
        model: &ContentModel,
        id: &Value,
    ) -> Result<bool, AppError> {
        let mut q = sql::delete(model, schema);
        q.params.push(id.clone());
        let deleted = Self::query_optional(pool, &q).await?.is_some();
        if deleted {
            tracing::info!(model = %model.segment, id = %id, "deleted");
        }
        Ok(deleted)
    }

    /// Number of rows in the model's table.
    pub async fn count(pool: &PgPool, schema: &str, model: &ContentModel) -> Result<i64, AppError> {
        let sql = sql::count(model, schema);
        tracing::debug!(sql = %sql, "query");
        let n = sqlx::query_scalar::<_, i64>(&sql).fetch_one(pool).await?;
        Ok(n)
    }

    async fn query_optional(pool: &PgPool, q: &QueryBuf) -> Result<Option<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let row = query.fetch_optional(pool).await?;
        Ok(row.map(|r| row_to_json(&r)))
    }

    async fn query_many(pool: &PgPool, q: &QueryBuf) -> Result<Vec<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let rows = query.fetch_all(pool).await?;
        Ok(rows.iter().map(row_to_json).collect())
    }
}

fn row_to_json(row: &sqlx::postgres::PgRow) -> Value {
    use sqlx::Column;
    use sqlx::Row;
    let mut map = serde_json::Map::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    Value::Object(map)
}

fn cell_to_value(row: &sqlx::postgres::PgRow, name: &str) -> Value {
    use sqlx::Row;
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(f)) = row.try_get::<Option<f64>, _>(name) {
        return float_to_value(f);
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(u)) = row.try_get::<Option<uuid::Uuid>, _>(name) {
        return Value::String(u.to_string());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name) {
        return Value::String(d.to_rfc3339());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDate>, _>(name) {
        return Value::String(d.format("%Y-%m-%d").to_string());
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    if let Ok(Some(j)) = row.try_get::<Option<serde_json::Value>, _>(name) {
        return j;
    }
    Value::Null
}

/// Whole floats come back as JSON integers so `1500000` round-trips unchanged.
fn float_to_value(f: f64) -> Value {
    if f.fract() == 0.0 && f.abs() < 9.0e15 {
        return Value::Number((f as i64).into());
    }
    serde_json::Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}
