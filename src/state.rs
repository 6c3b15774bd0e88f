//! Shared application state for all routes. Immutable after startup.

use crate::config::AppConfig;
use crate::error::AppError;
use crate::model::{Catalog, ContentModel};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub catalog: Arc<Catalog>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: PgPool, catalog: Catalog, config: AppConfig) -> Self {
        AppState {
            pool,
            catalog: Arc::new(catalog),
            config: Arc::new(config),
        }
    }

    /// PostgreSQL schema holding the content tables.
    pub fn schema(&self) -> &str {
        &self.catalog.schema
    }

    pub fn model(&self, segment: &str) -> Result<&ContentModel, AppError> {
        self.catalog
            .model(segment)
            .ok_or_else(|| AppError::NotFound(format!("model {}", segment)))
    }
}
