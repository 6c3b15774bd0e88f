//! HTTP handlers: public content, back office CRUD, forms and diagnostics.

pub mod admin;
pub mod diagnostics;
pub mod forms;
pub mod public;

use crate::error::AppError;
use crate::model::ContentModel;
use crate::service::coerce;
use serde_json::Value;
use std::collections::HashMap;

/// Query string of a list request: `limit`, `offset`, and exact-match filters on model columns.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct ListQuery {
    pub filters: Vec<(String, Value)>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ListQuery {
    /// Unknown keys are ignored; filter values are coerced like form submissions.
    pub fn parse(model: &ContentModel, params: HashMap<String, String>) -> Result<Self, AppError> {
        let mut q = ListQuery::default();
        let mut params: Vec<(String, String)> = params.into_iter().collect();
        params.sort();
        for (k, v) in params {
            match k.as_str() {
                "limit" => {
                    q.limit = Some(v.parse().map_err(|_| AppError::BadRequest("invalid limit".into()))?);
                }
                "offset" => {
                    q.offset = Some(v.parse().map_err(|_| AppError::BadRequest("invalid offset".into()))?);
                }
                "id" => {
                    let id = parse_id(&v)?;
                    q.filters.push((k, id));
                }
                _ => {
                    if let Some(field) = model.field(&k) {
                        let value = coerce(field, &Value::String(v))
                            .map_err(|kind| AppError::BadRequest(format!("filter {}: {}", k, kind.message_en())))?;
                        q.filters.push((k, value));
                    }
                }
            }
        }
        Ok(q)
    }
}

pub(crate) fn parse_id(id_str: &str) -> Result<Value, AppError> {
    let u = uuid::Uuid::parse_str(id_str).map_err(|_| AppError::BadRequest("invalid uuid".into()))?;
    Ok(Value::String(u.to_string()))
}

pub(crate) fn body_to_map(value: Value) -> Result<HashMap<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m.into_iter().collect()),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::builtin;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn list_query_coerces_filters_and_ignores_unknown_keys() {
        let q = ListQuery::parse(
            &builtin::projects(),
            params(&[("status", "En cours"), ("is_featured", "true"), ("lang", "en"), ("limit", "10")]),
        )
        .unwrap();
        assert_eq!(q.limit, Some(10));
        assert_eq!(q.offset, None);
        assert_eq!(
            q.filters,
            vec![
                ("is_featured".to_string(), json!(true)),
                ("status".to_string(), json!("in_progress")),
            ]
        );
    }

    #[test]
    fn bad_filters_are_client_errors() {
        let model = builtin::projects();
        assert!(matches!(
            ListQuery::parse(&model, params(&[("status", "inconnu")])),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            ListQuery::parse(&model, params(&[("limit", "-1")])),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(parse_id("42"), Err(AppError::BadRequest(_))));
    }
}
