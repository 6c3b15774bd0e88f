//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from a content model.

use crate::model::ContentModel;
use serde_json::Value;
use std::collections::HashMap;

/// Hard cap on list page size.
pub const MAX_LIMIT: u32 = 1000;

/// Quote identifier for PostgreSQL (safe: only from the model catalog).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

/// Cast type for a column's placeholder.
fn column_cast(model: &ContentModel, column: &str) -> &'static str {
    match column {
        "id" => "uuid",
        "created_at" | "updated_at" => "timestamptz",
        _ => model.field(column).map(|f| f.kind.pg_type()).unwrap_or("text"),
    }
}

fn placeholder(model: &ContentModel, column: &str, n: u32) -> String {
    format!("${}::{}", n, column_cast(model, column))
}

/// SELECT list: id, every field, timestamps.
fn select_column_list(model: &ContentModel) -> String {
    std::iter::once("id")
        .chain(model.fields.iter().map(|f| f.name.as_str()))
        .chain(["created_at", "updated_at"])
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

fn order_clause(model: &ContentModel) -> String {
    let dir = if model.order_by.descending { "DESC NULLS LAST" } else { "ASC NULLS LAST" };
    format!(
        " ORDER BY {} {}, {} ASC",
        quoted(&model.order_by.column),
        dir,
        quoted("id")
    )
}

/// SELECT by primary key. Caller adds id as sole param.
pub fn select_by_id(model: &ContentModel, schema: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, &model.table);
    let cols = select_column_list(model);
    q.sql = format!("SELECT {} FROM {} WHERE {} = $1::uuid", cols, table, quoted("id"));
    q
}

/// SELECT one row where `column` equals the single param.
pub fn select_by_column(model: &ContentModel, schema: &str, column: &str, value: Value) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, &model.table);
    let n = q.push_param(value);
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {} LIMIT 1",
        select_column_list(model),
        table,
        quoted(column),
        placeholder(model, column, n)
    );
    q
}

/// SELECT list with optional filters (exact match per column), ordered by the model's order column.
/// filters: only (col, value) where col is a model column; params bound in filter order.
pub fn select_list(
    model: &ContentModel,
    schema: &str,
    filters: &[(String, Value)],
    limit: Option<u32>,
    offset: Option<u32>,
) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, &model.table);

    let mut where_parts = Vec::new();
    for (col, val) in filters {
        if !model.has_column(col) {
            continue;
        }
        if val.is_null() {
            where_parts.push(format!("{} IS NULL", quoted(col)));
            continue;
        }
        let n = q.push_param(val.clone());
        where_parts.push(format!("{} = {}", quoted(col), placeholder(model, col, n)));
    }

    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    let limit_clause = limit.map(|n| format!(" LIMIT {}", n.min(MAX_LIMIT))).unwrap_or_default();
    let offset_clause = offset.map(|n| format!(" OFFSET {}", n)).unwrap_or_default();
    q.sql = format!(
        "SELECT {} FROM {}{}{}{}{}",
        select_column_list(model),
        table,
        where_clause,
        order_clause(model),
        limit_clause,
        offset_clause
    );
    q
}

/// INSERT: only fields present in body; id and timestamps come from column defaults.
pub fn insert(model: &ContentModel, schema: &str, body: &HashMap<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, &model.table);
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for f in &model.fields {
        let Some(val) = body.get(&f.name) else { continue };
        let n = q.push_param(val.clone());
        cols.push(quoted(&f.name));
        placeholders.push(placeholder(model, &f.name, n));
    }
    let returning = select_column_list(model);
    q.sql = if cols.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", table, returning)
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            table,
            cols.join(", "),
            placeholders.join(", "),
            returning
        )
    };
    q
}

/// UPDATE by id: SET only fields present in body, always bumps updated_at.
pub fn update(model: &ContentModel, schema: &str, id: &Value, body: &HashMap<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, &model.table);
    let mut sets = Vec::new();
    for f in &model.fields {
        let Some(val) = body.get(&f.name) else { continue };
        let n = q.push_param(val.clone());
        sets.push(format!("{} = {}", quoted(&f.name), placeholder(model, &f.name, n)));
    }
    sets.push(format!("{} = NOW()", quoted("updated_at")));
    let id_param = q.push_param(id.clone());
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${}::uuid RETURNING {}",
        table,
        sets.join(", "),
        quoted("id"),
        id_param,
        select_column_list(model)
    );
    q
}

/// DELETE by id. Caller adds id as sole param.
pub fn delete(model: &ContentModel, schema: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, &model.table);
    q.sql = format!(
        "DELETE FROM {} WHERE {} = $1::uuid RETURNING {}",
        table,
        quoted("id"),
        quoted("id")
    );
    q
}

/// COUNT(*) of a table.
pub fn count(model: &ContentModel, schema: &str) -> String {
    format!("SELECT COUNT(*) FROM {}", qualified_table(schema, &model.table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::builtin;
    use serde_json::json;

    #[test]
    fn list_filters_only_known_columns_and_casts_params() {
        let m = builtin::projects();
        let filters = vec![
            ("status".to_string(), json!("in_progress")),
            ("is_featured".to_string(), json!(true)),
            ("password".to_string(), json!("x")),
        ];
        let q = select_list(&m, "public", &filters, Some(5000), Some(20));
        assert!(q.sql.starts_with("SELECT \"id\", \"title\", \"slug\""));
        assert!(q.sql.contains("FROM \"public\".\"projects\""));
        assert!(q.sql.contains("WHERE \"status\" = $1::text AND \"is_featured\" = $2::boolean"));
        assert!(q.sql.contains("ORDER BY \"created_at\" DESC NULLS LAST, \"id\" ASC"));
        assert!(q.sql.ends_with("LIMIT 1000 OFFSET 20"));
        assert_eq!(q.params, vec![json!("in_progress"), json!(true)]);
    }

    #[test]
    fn null_filter_becomes_is_null() {
        let m = builtin::news();
        let q = select_list(&m, "public", &[("published_at".into(), Value::Null)], None, None);
        assert!(q.sql.contains("WHERE \"published_at\" IS NULL"));
        assert!(q.params.is_empty());
    }

    #[test]
    fn insert_binds_present_fields_in_model_order() {
        let m = builtin::tenders();
        let body: HashMap<String, Value> = [
            ("submission_deadline".to_string(), json!("2025-03-31")),
            ("title".to_string(), json!("Voirie de Diamniadio")),
            ("estimated_amount".to_string(), json!(125000000)),
        ]
        .into_iter()
        .collect();
        let q = insert(&m, "public", &body);
        assert!(q.sql.starts_with(
            "INSERT INTO \"public\".\"tenders\" (\"title\", \"estimated_amount\", \"submission_deadline\") \
             VALUES ($1::text, $2::double precision, $3::date) RETURNING \"id\""
        ));
        assert_eq!(q.params[0], json!("Voirie de Diamniadio"));
        assert_eq!(q.params[2], json!("2025-03-31"));
    }

    #[test]
    fn update_sets_fields_and_timestamp_then_id() {
        let m = builtin::partners();
        let body: HashMap<String, Value> = [("is_active".to_string(), json!(false))].into_iter().collect();
        let id = json!("5b0b3f1e-6a43-4c8e-9a37-2a3f0f4b9e11");
        let q = update(&m, "public", &id, &body);
        assert!(q.sql.contains("SET \"is_active\" = $1::boolean, \"updated_at\" = NOW() WHERE \"id\" = $2::uuid"));
        assert_eq!(q.params, vec![json!(false), id]);
    }

    #[test]
    fn slug_lookup_and_delete_shapes() {
        let m = builtin::news();
        let q = select_by_column(&m, "public", "slug", json!("lancement-pnat"));
        assert!(q.sql.ends_with("WHERE \"slug\" = $1::text LIMIT 1"));
        let d = delete(&m, "public");
        assert_eq!(d.sql, "DELETE FROM \"public\".\"news\" WHERE \"id\" = $1::uuid RETURNING \"id\"");
    }
}
