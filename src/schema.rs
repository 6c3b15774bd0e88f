//! Database schema diagnostics and repair derived from the content models.
//! `check` reads `information_schema`; `repair` only ever adds tables and columns.

use crate::error::AppError;
use crate::model::{Catalog, ContentModel, FieldDef};
use crate::sql::{qualified_table, quoted};
use serde::Serialize;
use sqlx::PgPool;
use std::collections::{HashMap, HashSet};

/// State of one model's table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableReport {
    pub segment: String,
    pub table: String,
    pub exists: bool,
    /// Model columns absent from an existing table.
    pub missing_columns: Vec<String>,
}

impl TableReport {
    pub fn is_ok(&self) -> bool {
        self.exists && self.missing_columns.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SchemaReport {
    pub schema: String,
    pub profiles_table: bool,
    pub tables: Vec<TableReport>,
}

impl SchemaReport {
    pub fn is_healthy(&self) -> bool {
        self.profiles_table && self.tables.iter().all(TableReport::is_ok)
    }

    /// Build a report from the columns found per table.
    pub fn from_columns(catalog: &Catalog, found: &HashMap<String, HashSet<String>>) -> Self {
        let tables = catalog
            .models
            .iter()
            .map(|m| match found.get(&m.table) {
                None => TableReport {
                    segment: m.segment.clone(),
                    table: m.table.clone(),
                    exists: false,
                    missing_columns: Vec::new(),
                },
                Some(columns) => TableReport {
                    segment: m.segment.clone(),
                    table: m.table.clone(),
                    exists: true,
                    missing_columns: expected_columns(m)
                        .filter(|c| !columns.contains(*c))
                        .map(str::to_string)
                        .collect(),
                },
            })
            .collect();
        SchemaReport {
            schema: catalog.schema.clone(),
            profiles_table: found.contains_key(PROFILES_TABLE),
            tables,
        }
    }
}

const PROFILES_TABLE: &str = "profiles";

fn expected_columns(model: &ContentModel) -> impl Iterator<Item = &str> {
    crate::model::SYSTEM_COLUMNS
        .iter()
        .copied()
        .chain(model.fields.iter().map(|f| f.name.as_str()))
}

fn column_def(field: &FieldDef, in_create: bool) -> String {
    let mut def = format!("{} {}", quoted(&field.name), field.kind.pg_type());
    if in_create && field.required {
        def.push_str(" NOT NULL");
    }
    if field.unique {
        def.push_str(" UNIQUE");
    }
    def
}

/// `CREATE TABLE IF NOT EXISTS` for one model.
pub fn create_table_sql(model: &ContentModel, schema: &str) -> String {
    let mut defs = vec![
        format!("{} uuid PRIMARY KEY DEFAULT gen_random_uuid()", quoted("id")),
        format!("{} timestamptz NOT NULL DEFAULT NOW()", quoted("created_at")),
        format!("{} timestamptz NOT NULL DEFAULT NOW()", quoted("updated_at")),
    ];
    defs.extend(model.fields.iter().map(|f| column_def(f, true)));
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        qualified_table(schema, &model.table),
        defs.join(",\n  ")
    )
}

/// `ADD COLUMN IF NOT EXISTS` for one field. Added columns stay nullable so existing rows remain valid.
pub fn add_column_sql(model: &ContentModel, schema: &str, field: &FieldDef) -> String {
    format!(
        "ALTER TABLE {} ADD COLUMN IF NOT EXISTS {}",
        qualified_table(schema, &model.table),
        column_def(field, false)
    )
}

fn profiles_sql(schema: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  \"id\" uuid PRIMARY KEY,\n  \"full_name\" text,\n  \"role\" text NOT NULL DEFAULT 'viewer',\n  \"created_at\" timestamptz NOT NULL DEFAULT NOW()\n)",
        qualified_table(schema, PROFILES_TABLE)
    )
}

/// Compare the catalog with the live database.
pub async fn check(pool: &PgPool, catalog: &Catalog) -> Result<SchemaReport, AppError> {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name::text, column_name::text FROM information_schema.columns WHERE table_schema = $1",
    )
    .bind(&catalog.schema)
    .fetch_all(pool)
    .await?;
    let mut found: HashMap<String, HashSet<String>> = HashMap::new();
    for (table, column) in rows {
        found.entry(table).or_default().insert(column);
    }
    let report = SchemaReport::from_columns(catalog, &found);
    for t in report.tables.iter().filter(|t| !t.is_ok()) {
        tracing::warn!(table = %t.table, exists = t.exists, missing = ?t.missing_columns, "schema drift");
    }
    Ok(report)
}

/// Create missing tables and columns, then report the result.
pub async fn repair(pool: &PgPool, catalog: &Catalog) -> Result<SchemaReport, AppError> {
    if catalog.schema != "public" {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(&catalog.schema)))
            .execute(pool)
            .await?;
    }
    sqlx::query(&profiles_sql(&catalog.schema)).execute(pool).await?;

    let before = check(pool, catalog).await?;
    for (model, table) in catalog.models.iter().zip(&before.tables) {
        if !table.exists {
            let sql = create_table_sql(model, &catalog.schema);
            tracing::debug!(sql = %sql, "ddl");
            sqlx::query(&sql).execute(pool).await?;
            tracing::info!(table = %model.table, "created table");
            continue;
        }
        for name in &table.missing_columns {
            let Some(field) = model.field(name) else {
                continue;
            };
            let sql = add_column_sql(model, &catalog.schema, field);
            tracing::debug!(sql = %sql, "ddl");
            sqlx::query(&sql).execute(pool).await?;
            tracing::info!(table = %model.table, column = %name, "added column");
        }
    }
    check(pool, catalog).await
}
