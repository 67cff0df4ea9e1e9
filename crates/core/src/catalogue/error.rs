use thiserror::Error;

use super::GameId;
use crate::cache::CacheError;
use crate::storage::RepositoryError;

/// Errors returned by [`CatalogueCache`](super::CatalogueCache) operations.
///
/// Collaborator failures are wrapped unchanged; the catalogue only tells
/// "not found" apart from everything else.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogueError {
    #[error("Game not found: {0}")]
    NotFound(GameId),
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] RepositoryError),
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(#[from] CacheError),
}

impl CatalogueError {
    /// Returns true for [`CatalogueError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Maps a store error for `id`, turning the store's not-found into ours.
    pub fn from_store(err: RepositoryError, id: GameId) -> Self {
        match err {
            RepositoryError::NotFound { .. } => Self::NotFound(id),
            other => Self::StoreUnavailable(other),
        }
    }
}

/// Result type for catalogue operations.
pub type Result<T> = std::result::Result<T, CatalogueError>;
