pub mod types;
pub mod builtin;
pub mod catalog;
pub mod validator;

pub use types::*;
pub use catalog::Catalog;
pub use validator::validate;
