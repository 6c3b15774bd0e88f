//! Urbanisme CMS: model-driven content backend for the ministry website.
//! Public reads with fallback content, and a role-gated back office over the same models.

pub mod auth;
pub mod cms;
pub mod config;
pub mod error;
pub mod extractors;
pub mod form;
pub mod handlers;
pub mod locale;
pub mod model;
pub mod response;
pub mod routes;
pub mod schema;
pub mod seed;
pub mod service;
pub mod sql;
pub mod state;
pub mod status;

pub use cms::CmsService;
pub use config::{AppConfig, ConfigError};
pub use error::{AppError, FieldErrors, ModelError};
pub use locale::Locale;
pub use model::{Catalog, ContentModel};
pub use response::{success_many, success_one};
pub use routes::app;
pub use service::CrudService;
pub use state::AppState;
