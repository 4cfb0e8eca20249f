mod models;
mod schema;
mod store;
mod trait_def;
mod validation;

pub use models::*;
pub use schema::CATALOG_SCHEMA;
pub use store::{SqliteCatalogStore, PAGE_SIZE};
pub use trait_def::{CatalogStore, WriteOutcome};
pub use validation::{ValidationError, ValidationResult, MAX_TEXT_LEN};
