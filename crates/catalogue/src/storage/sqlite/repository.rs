//! SQLite repository implementation.
//!
//! Implements `CatalogueStore` and `UserRepository` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use catalogue_core::auth::{ApiToken, User};
use catalogue_core::catalogue::{Game, GameId, GameInput};
use catalogue_core::storage::{CatalogueStore, Page, RepositoryError, Result, UserRepository};

use super::conversions::{format_datetime, roles_to_string, row_to_game, row_to_user};
use super::error::map_tokio_rusqlite_error_with_id;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Data is lost when the connection is dropped.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

/// Owned column values of a game row, ready to move into a connection closure.
struct GameColumns {
    title: String,
    description: Option<String>,
    release_at: Option<String>,
    studio: String,
    picture: Option<String>,
}

impl From<&GameInput> for GameColumns {
    fn from(input: &GameInput) -> Self {
        Self {
            title: input.title.clone(),
            description: input.description.clone(),
            release_at: input.release_at.as_ref().map(format_datetime),
            studio: input.studio.clone(),
            picture: input.picture.clone(),
        }
    }
}

// ============================================================================
// CatalogueStore implementation
// ============================================================================

#[async_trait]
impl CatalogueStore for SqliteRepository {
    async fn find_page(&self, page: Page) -> Result<Vec<Game>> {
        let limit = i64::from(page.limit());
        let offset = i64::try_from(page.offset()).map_err(|_| {
            RepositoryError::InvalidData(format!("Offset too large: {}", page.offset()))
        })?;

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_GAMES_PAGE).map_err(wrap_err)?;
                let rows = stmt
                    .query_map([limit, offset], row_to_game)
                    .map_err(wrap_err)?;

                let mut games = Vec::new();
                for row_result in rows {
                    games.push(row_result.map_err(wrap_err)?);
                }
                Ok(games)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Game", "unknown"))
    }

    async fn find_by_id(&self, id: GameId) -> Result<Option<Game>> {
        let raw_id = id.as_i64();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_GAME_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([raw_id], row_to_game) {
                    Ok(game) => Ok(Some(game)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Game", id.to_string()))
    }

    async fn insert(&self, input: &GameInput) -> Result<Game> {
        let columns = GameColumns::from(input);
        let input = input.clone();

        let id = self
            .conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_GAME,
                    rusqlite::params![
                        columns.title,
                        columns.description,
                        columns.release_at,
                        columns.studio,
                        columns.picture,
                    ],
                )
                .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Game", "unknown"))?;

        Ok(Game::from_input(GameId(id), input))
    }

    async fn update_by_id(&self, id: GameId, input: &GameInput) -> Result<Game> {
        let raw_id = id.as_i64();
        let columns = GameColumns::from(input);

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_GAME,
                        rusqlite::params![
                            raw_id,
                            columns.title,
                            columns.description,
                            columns.release_at,
                            columns.studio,
                            columns.picture,
                        ],
                    )
                    .map_err(wrap_err)?;

                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Game", id.to_string()))?;

        Ok(Game::from_input(id, input.clone()))
    }

    async fn delete_by_id(&self, id: GameId) -> Result<()> {
        let raw_id = id.as_i64();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_GAME, [raw_id])
                    .map_err(wrap_err)?;

                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Game", id.to_string()))
    }

    async fn count(&self) -> Result<u64> {
        let count = self
            .conn
            .call(|conn| {
                conn.query_row(schema::COUNT_GAMES, [], |row| row.get::<_, i64>(0))
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Game", "unknown"))?;

        u64::try_from(count)
            .map_err(|_| RepositoryError::InvalidData(format!("Negative game count: {count}")))
    }
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn get_user_by_token(&self, token: &ApiToken) -> Result<Option<User>> {
        let token = token.as_str().to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_USER_BY_TOKEN)
                    .map_err(wrap_err)?;
                match stmt.query_row([&token], row_to_user) {
                    Ok(user) => Ok(Some(user)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", "unknown"))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.to_string();
        let email_for_error = email.clone();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_USER_BY_EMAIL)
                    .map_err(wrap_err)?;
                match stmt.query_row([&email], row_to_user) {
                    Ok(user) => Ok(Some(user)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", email_for_error))
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let id = user.id.to_string();
        let pseudo = user.pseudo.clone();
        let email = user.email.clone();
        let roles = roles_to_string(&user.roles);
        let password_hash = user.password_hash.clone();
        let api_token = user.api_token.as_str().to_string();
        let created_at = format_datetime(&user.created_at);

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_USER,
                    rusqlite::params![
                        id,
                        pseudo,
                        email,
                        roles,
                        password_hash,
                        api_token,
                        created_at
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", user.email.clone()))
    }
}
