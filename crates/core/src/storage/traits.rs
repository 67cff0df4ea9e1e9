use async_trait::async_trait;

use crate::auth::{ApiToken, User};
use crate::catalogue::{Game, GameId, GameInput};

use super::{Page, Result};

/// Authoritative storage of catalogue games.
///
/// The store assigns ids on insert; ids are never reused or changed.
#[async_trait]
pub trait CatalogueStore: Send + Sync {
    /// Gets one page of games, ordered by ascending id.
    async fn find_page(&self, page: Page) -> Result<Vec<Game>>;

    /// Gets a game by its ID.
    async fn find_by_id(&self, id: GameId) -> Result<Option<Game>>;

    /// Persists a new game and returns it with its assigned id.
    async fn insert(&self, input: &GameInput) -> Result<Game>;

    /// Replaces the fields of an existing game.
    ///
    /// Fails with `RepositoryError::NotFound` if no game has this id.
    async fn update_by_id(&self, id: GameId, input: &GameInput) -> Result<Game>;

    /// Deletes a game by its ID.
    ///
    /// Fails with `RepositoryError::NotFound` if no game has this id.
    async fn delete_by_id(&self, id: GameId) -> Result<()>;

    /// Counts all games.
    async fn count(&self) -> Result<u64>;
}

/// Repository for registered users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Gets the user owning an API token.
    async fn get_user_by_token(&self, token: &ApiToken) -> Result<Option<User>>;

    /// Gets a user by their email address.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Creates a new user.
    ///
    /// Fails with `RepositoryError::AlreadyExists` if the email is taken.
    async fn create_user(&self, user: &User) -> Result<()>;
}
