//! In-memory repository implementation.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use catalogue_core::auth::{ApiToken, User};
use catalogue_core::catalogue::{Game, GameId, GameInput};
use catalogue_core::storage::{CatalogueStore, Page, RepositoryError, Result, UserRepository};

#[derive(Debug, Default)]
struct Games {
    rows: BTreeMap<GameId, Game>,
    /// Last id handed out. Ids are never reused, even after a delete.
    last_id: i64,
}

/// In-memory storage backend.
///
/// Uses maps wrapped in `Arc<RwLock<_>>` for thread-safe access.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    games: Arc<RwLock<Games>>,
    /// Users keyed by lowercase email.
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn game_not_found(id: GameId) -> RepositoryError {
    RepositoryError::NotFound {
        entity_type: "Game",
        id: id.to_string(),
    }
}

#[async_trait]
impl CatalogueStore for InMemoryRepository {
    async fn find_page(&self, page: Page) -> Result<Vec<Game>> {
        let games = self.games.read().await;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        Ok(games
            .rows
            .values()
            .skip(offset)
            .take(page.limit() as usize)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: GameId) -> Result<Option<Game>> {
        let games = self.games.read().await;
        Ok(games.rows.get(&id).cloned())
    }

    async fn insert(&self, input: &GameInput) -> Result<Game> {
        let mut games = self.games.write().await;
        games.last_id += 1;
        let id = GameId(games.last_id);
        let game = Game::from_input(id, input.clone());
        games.rows.insert(id, game.clone());
        Ok(game)
    }

    async fn update_by_id(&self, id: GameId, input: &GameInput) -> Result<Game> {
        let mut games = self.games.write().await;
        let slot = games.rows.get_mut(&id).ok_or_else(|| game_not_found(id))?;
        *slot = Game::from_input(id, input.clone());
        Ok(slot.clone())
    }

    async fn delete_by_id(&self, id: GameId) -> Result<()> {
        let mut games = self.games.write().await;
        if games.rows.remove(&id).is_none() {
            return Err(game_not_found(id));
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64> {
        let games = self.games.read().await;
        Ok(games.rows.len() as u64)
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn get_user_by_token(&self, token: &ApiToken) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| &u.api_token == token).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&email.to_lowercase()).cloned())
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        let key = user.email.to_lowercase();
        if users.contains_key(&key) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: user.email.clone(),
            });
        }
        users.insert(key, user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogue_core::auth::Role;

    fn input(n: u32) -> GameInput {
        GameInput::new(format!("Game {n}"), format!("Studio {n}"))
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let repo = InMemoryRepository::new();

        let first = repo.insert(&input(1)).await.unwrap();
        let second = repo.insert(&input(2)).await.unwrap();

        assert_eq!(first.id, GameId(1));
        assert_eq!(second.id, GameId(2));
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryRepository::new();
        let game = repo.insert(&input(1)).await.unwrap();
        repo.delete_by_id(game.id).await.unwrap();

        let next = repo.insert(&input(2)).await.unwrap();

        assert_eq!(next.id, GameId(2));
    }

    #[tokio::test]
    async fn test_find_page_orders_by_id() {
        let repo = InMemoryRepository::new();
        for n in 1..=5 {
            repo.insert(&input(n)).await.unwrap();
        }

        let page = repo.find_page(Page::new(2, 2).unwrap()).await.unwrap();
        let ids: Vec<_> = page.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![GameId(3), GameId(4)]);

        let beyond = repo.find_page(Page::new(4, 2).unwrap()).await.unwrap();
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let repo = InMemoryRepository::new();
        let game = repo.insert(&input(1).with_description("old")).await.unwrap();

        let updated = repo
            .update_by_id(game.id, &GameInput::new("New", "Studio"))
            .await
            .unwrap();

        assert_eq!(updated.id, game.id);
        assert_eq!(updated.title, "New");
        assert_eq!(updated.description, None);
        assert_eq!(repo.find_by_id(game.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_are_not_found() {
        let repo = InMemoryRepository::new();

        let update = repo.update_by_id(GameId(9), &input(9)).await;
        let delete = repo.delete_by_id(GameId(9)).await;

        assert!(matches!(update, Err(RepositoryError::NotFound { .. })));
        assert!(matches!(delete, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_user_lookup_by_token_and_email() {
        let repo = InMemoryRepository::new();
        let user = User::new("splint", "splint@test.fr", "hash", ApiToken::new("tok"))
            .with_role(Role::Admin);
        repo.create_user(&user).await.unwrap();

        let by_token = repo.get_user_by_token(&ApiToken::new("tok")).await.unwrap();
        let by_email = repo.get_user_by_email("SPLINT@test.fr").await.unwrap();

        assert_eq!(by_token, Some(user.clone()));
        assert_eq!(by_email, Some(user));
        assert_eq!(
            repo.get_user_by_token(&ApiToken::new("nope")).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let repo = InMemoryRepository::new();
        repo.create_user(&User::new("a", "a@test.fr", "h", ApiToken::new("1")))
            .await
            .unwrap();

        let result = repo
            .create_user(&User::new("b", "A@test.fr", "h", ApiToken::new("2")))
            .await;

        assert!(matches!(
            result,
            Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                ..
            })
        ));
    }
}
