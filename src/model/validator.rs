//! Catalog validation: every model must be internally consistent before it is served.

use crate::error::ModelError;
use crate::model::{ContentModel, FieldKind, SYSTEM_COLUMNS};
use regex::Regex;
use std::collections::HashSet;

pub fn validate(models: &[ContentModel]) -> Result<(), ModelError> {
    let mut segments = HashSet::new();
    for m in models {
        if !segments.insert(m.segment.as_str()) {
            return Err(ModelError::DuplicateSegment(m.segment.clone()));
        }
        validate_model(m)?;
    }
    Ok(())
}

fn validate_model(m: &ContentModel) -> Result<(), ModelError> {
    let mut names = HashSet::new();
    for f in &m.fields {
        if SYSTEM_COLUMNS.contains(&f.name.as_str()) {
            return Err(ModelError::ReservedField {
                model: m.segment.clone(),
                field: f.name.clone(),
            });
        }
        if !names.insert(f.name.as_str()) {
            return Err(ModelError::DuplicateField {
                model: m.segment.clone(),
                field: f.name.clone(),
            });
        }
        if let FieldKind::Select { options } = &f.kind {
            if options.is_empty() {
                return Err(ModelError::EmptySelect {
                    model: m.segment.clone(),
                    field: f.name.clone(),
                });
            }
        }
        if let Some(pattern) = &f.pattern {
            Regex::new(pattern).map_err(|e| ModelError::InvalidPattern {
                model: m.segment.clone(),
                field: f.name.clone(),
                message: e.to_string(),
            })?;
        }
    }

    for col in &m.list_columns {
        if !m.has_column(col) {
            return Err(unknown(m, col, "list_columns"));
        }
    }
    if !m.has_column(&m.order_by.column) {
        return Err(unknown(m, &m.order_by.column, "order_by"));
    }
    if let Some(slug) = &m.slug_field {
        if m.field(slug).is_none() {
            return Err(unknown(m, slug, "slug_field"));
        }
    }
    Ok(())
}

fn unknown(m: &ContentModel, column: &str, context: &'static str) -> ModelError {
    ModelError::UnknownColumn {
        model: m.segment.clone(),
        column: column.to_string(),
        context,
    }
}
