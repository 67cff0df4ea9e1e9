//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use catalogue_core::auth::{ApiToken, Role, User};
use catalogue_core::catalogue::{Game, GameId};
use chrono::{DateTime, Utc};
use rusqlite::Row;
use uuid::Uuid;

/// Convert a SQLite row to a Game.
///
/// Expected columns: id, title, description, release_at, studio, picture
pub fn row_to_game(row: &Row) -> rusqlite::Result<Game> {
    let id: i64 = row.get(0)?;
    let title: String = row.get(1)?;
    let description: Option<String> = row.get(2)?;
    let release_at: Option<String> = row.get(3)?;
    let studio: String = row.get(4)?;
    let picture: Option<String> = row.get(5)?;

    Ok(Game {
        id: GameId(id),
        title,
        description,
        release_at: release_at.as_deref().map(parse_datetime).transpose()?,
        studio,
        picture,
    })
}

/// Convert a SQLite row to a User.
///
/// Expected columns: id, pseudo, email, roles, password_hash, api_token, created_at
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    let id: String = row.get(0)?;
    let pseudo: String = row.get(1)?;
    let email: String = row.get(2)?;
    let roles: String = row.get(3)?;
    let password_hash: String = row.get(4)?;
    let api_token: String = row.get(5)?;
    let created_at: String = row.get(6)?;

    Ok(User {
        id: parse_uuid(&id)?,
        pseudo,
        email,
        roles: parse_roles(&roles)?,
        password_hash,
        api_token: ApiToken::new(api_token),
        created_at: parse_datetime(&created_at)?,
    })
}

/// Serialize roles as a comma-separated list of their wire names.
pub fn roles_to_string(roles: &[Role]) -> String {
    roles
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Format a DateTime<Utc> for SQLite storage (RFC 3339).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn conversion_error(message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message)),
    )
}

/// Parse a UUID from string.
fn parse_uuid(s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Parse a comma-separated role list.
fn parse_roles(s: &str) -> rusqlite::Result<Vec<Role>> {
    s.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(|r| Role::parse(r).ok_or_else(|| conversion_error(format!("Unknown role: {r}"))))
        .collect()
}
