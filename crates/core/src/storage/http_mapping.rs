//! Pure functions for mapping storage and catalogue errors to HTTP status codes.

use super::RepositoryError;
use crate::catalogue::CatalogueError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `AlreadyExists` -> 409 (Conflict)
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `QueryFailed` -> 500 (Internal Server Error)
/// - `Serialization` -> 500 (Internal Server Error)
/// - `InvalidData` -> 400 (Bad Request)
///
/// # Examples
///
/// ```
/// use catalogue_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::NotFound {
///     entity_type: "Game",
///     id: "42".to_string(),
/// };
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) => 500,
        RepositoryError::Serialization(_) => 500,
        RepositoryError::InvalidData(_) => 400,
    }
}

/// Maps a [`CatalogueError`] to an HTTP status code.
///
/// Store failures reuse [`repository_error_to_status_code`]; any cache
/// failure is reported as 503 since the cache is a transport-level dependency.
pub fn catalogue_error_to_status_code(error: &CatalogueError) -> u16 {
    match error {
        CatalogueError::NotFound(_) => 404,
        CatalogueError::StoreUnavailable(inner) => repository_error_to_status_code(inner),
        CatalogueError::CacheUnavailable(_) => 503,
    }
}
