//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Games table
CREATE TABLE IF NOT EXISTS games (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    release_at TEXT,
    studio TEXT NOT NULL,
    picture TEXT
);

-- Users table
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    pseudo TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE COLLATE NOCASE,
    roles TEXT NOT NULL,
    password_hash TEXT NOT NULL,
    api_token TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);
"#;

// Game queries
pub const INSERT_GAME: &str = r#"
INSERT INTO games (title, description, release_at, studio, picture)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_GAME_BY_ID: &str = r#"
SELECT id, title, description, release_at, studio, picture
FROM games
WHERE id = ?1
"#;

pub const SELECT_GAMES_PAGE: &str = r#"
SELECT id, title, description, release_at, studio, picture
FROM games
ORDER BY id ASC
LIMIT ?1 OFFSET ?2
"#;

pub const UPDATE_GAME: &str = r#"
UPDATE games
SET title = ?2, description = ?3, release_at = ?4, studio = ?5, picture = ?6
WHERE id = ?1
"#;

pub const DELETE_GAME: &str = r#"
DELETE FROM games
WHERE id = ?1
"#;

pub const COUNT_GAMES: &str = r#"
SELECT COUNT(*) FROM games
"#;

// User queries
pub const INSERT_USER: &str = r#"
INSERT INTO users (id, pseudo, email, roles, password_hash, api_token, created_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub const SELECT_USER_BY_TOKEN: &str = r#"
SELECT id, pseudo, email, roles, password_hash, api_token, created_at
FROM users
WHERE api_token = ?1
"#;

pub const SELECT_USER_BY_EMAIL: &str = r#"
SELECT id, pseudo, email, roles, password_hash, api_token, created_at
FROM users
WHERE email = ?1
"#;
