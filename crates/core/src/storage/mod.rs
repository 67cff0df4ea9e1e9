mod error;
mod http_mapping;
mod traits;
mod types;

pub use error::{PageError, RepositoryError, Result};
pub use http_mapping::{catalogue_error_to_status_code, repository_error_to_status_code};
pub use traits::{CatalogueStore, UserRepository};
pub use types::Page;
