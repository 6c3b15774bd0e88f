//! Validated, indexed set of content models served by one process.

use crate::error::ModelError;
use crate::model::{builtin, validate, ContentModel};
use std::collections::HashMap;
use std::path::Path;

#[derive(Clone, Debug)]
pub struct Catalog {
    /// PostgreSQL schema holding the content tables.
    pub schema: String,
    pub models: Vec<ContentModel>,
    by_segment: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(schema: &str, models: Vec<ContentModel>) -> Result<Self, ModelError> {
        validate(&models)?;
        let by_segment = models
            .iter()
            .enumerate()
            .map(|(i, m)| (m.segment.clone(), i))
            .collect();
        Ok(Catalog {
            schema: schema.to_string(),
            models,
            by_segment,
        })
    }

    pub fn builtin(schema: &str) -> Result<Self, ModelError> {
        Self::new(schema, builtin::all())
    }

    /// Load models from a JSON array of model definitions.
    pub async fn from_json_file(schema: &str, path: &Path) -> Result<Self, ModelError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ModelError::Load(format!("{}: {}", path.display(), e)))?;
        let models: Vec<ContentModel> =
            serde_json::from_str(&raw).map_err(|e| ModelError::Load(format!("{}: {}", path.display(), e)))?;
        tracing::info!(path = %path.display(), models = models.len(), "loaded content models");
        Self::new(schema, models)
    }

    pub fn model(&self, segment: &str) -> Option<&ContentModel> {
        self.by_segment.get(segment).map(|&i| &self.models[i])
    }

    pub fn public_model(&self, segment: &str) -> Option<&ContentModel> {
        self.model(segment).filter(|m| m.public)
    }
}
