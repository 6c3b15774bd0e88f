//! CrudService: generic CRUD using safe SQL builder.

mod crud;
mod validation;
pub use crud::{CrudService, DEFAULT_LIMIT};
pub use validation::RequestValidator;
pub(crate) use validation::coerce;
