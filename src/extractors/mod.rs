//! Request extractors shared by handlers.

pub mod auth;
pub mod json;
pub mod locale;

pub use auth::{AuthRejection, AuthUser, RequireAdmin, RequireEditor};
pub use json::JsonBody;
pub use locale::Lang;
