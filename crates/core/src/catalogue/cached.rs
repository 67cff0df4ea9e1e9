//! Read-through catalogue cache with tag-based invalidation.
//!
//! Reads go to the [`KeyValueCache`] first and fall back to the
//! [`CatalogueStore`] on a miss, populating the cache under
//! [`CATALOGUE_TAG`]. Every successful write evicts the whole tag, so no list
//! or detail entry outlives a change to the catalogue.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{
    deserialize_game, deserialize_games, game_key, game_list_key, serialize_game,
    serialize_games, CacheError, KeyValueCache, CATALOGUE_TAG,
};
use crate::storage::{CatalogueStore, Page};

use super::{CatalogueError, Game, GameId, GameInput, Result};

/// Tag-invalidated read-through cache in front of a [`CatalogueStore`].
///
/// Inputs to `create` and `update` must already be validated and authorized.
/// Collaborator errors propagate unchanged and are never retried. A failed
/// store write never invalidates the cache.
#[derive(Clone)]
pub struct CatalogueCache {
    store: Arc<dyn CatalogueStore>,
    cache: Arc<dyn KeyValueCache>,
    ttl: Option<Duration>,
}

impl CatalogueCache {
    /// Creates a catalogue cache whose entries live until invalidated.
    pub fn new(store: Arc<dyn CatalogueStore>, cache: Arc<dyn KeyValueCache>) -> Self {
        Self {
            store,
            cache,
            ttl: None,
        }
    }

    /// Sets an expiry on populated entries. Invalidation still applies.
    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    /// Returns one page of games.
    pub async fn get_list(&self, page: Page) -> Result<Vec<Game>> {
        let cache_key = game_list_key(page);

        if let Some(bytes) = self.cache.get(&cache_key).await? {
            match deserialize_games(&bytes) {
                Ok(games) => {
                    tracing::trace!(
                        page = page.page(),
                        limit = page.limit(),
                        count = games.len(),
                        "Cache hit for game list"
                    );
                    return Ok(games);
                }
                Err(err) => {
                    tracing::warn!(key = %cache_key, error = %err, "Cached game list is unreadable");
                }
            }
        }

        tracing::trace!(
            page = page.page(),
            limit = page.limit(),
            "Cache miss for game list"
        );
        let games = self.store.find_page(page).await?;

        let bytes = serialize_games(&games).map_err(CacheError::from)?;
        self.populate(&cache_key, &bytes).await?;

        Ok(games)
    }

    /// Returns a single game.
    ///
    /// A game the store does not know is reported as
    /// [`CatalogueError::NotFound`] and leaves the cache untouched.
    pub async fn get_detail(&self, id: GameId) -> Result<Game> {
        let cache_key = game_key(id);

        if let Some(bytes) = self.cache.get(&cache_key).await? {
            match deserialize_game(&bytes) {
                Ok(game) => {
                    tracing::trace!(game_id = %id, "Cache hit for game");
                    return Ok(game);
                }
                Err(err) => {
                    tracing::warn!(game_id = %id, error = %err, "Cached game is unreadable");
                }
            }
        }

        tracing::trace!(game_id = %id, "Cache miss for game");
        let game = self
            .store
            .find_by_id(id)
            .await
            .map_err(|err| CatalogueError::from_store(err, id))?
            .ok_or(CatalogueError::NotFound(id))?;

        let bytes = serialize_game(&game).map_err(CacheError::from)?;
        self.populate(&cache_key, &bytes).await?;

        Ok(game)
    }

    /// Persists a new game and evicts every catalogue entry.
    pub async fn create(&self, input: &GameInput) -> Result<Game> {
        let game = self.store.insert(input).await?;
        self.invalidate().await?;

        tracing::debug!(game_id = %game.id, title = %game.title, "Game created");
        Ok(game)
    }

    /// Replaces a game's fields and evicts every catalogue entry.
    pub async fn update(&self, id: GameId, input: &GameInput) -> Result<Game> {
        let game = self
            .store
            .update_by_id(id, input)
            .await
            .map_err(|err| CatalogueError::from_store(err, id))?;
        self.invalidate().await?;

        tracing::debug!(game_id = %id, "Game updated");
        Ok(game)
    }

    /// Deletes a game and evicts every catalogue entry.
    pub async fn delete(&self, id: GameId) -> Result<()> {
        self.store
            .delete_by_id(id)
            .await
            .map_err(|err| CatalogueError::from_store(err, id))?;
        self.invalidate().await?;

        tracing::debug!(game_id = %id, "Game deleted");
        Ok(())
    }

    async fn populate(&self, key: &str, bytes: &[u8]) -> Result<()> {
        self.cache.set(key, bytes, &[CATALOGUE_TAG], self.ttl).await?;
        Ok(())
    }

    async fn invalidate(&self) -> Result<()> {
        self.cache.invalidate_tags(&[CATALOGUE_TAG]).await?;
        tracing::debug!(tag = CATALOGUE_TAG, "Invalidated catalogue cache");
        Ok(())
    }
}
