//! Pure functions for serializing/deserializing games to/from cache bytes.
//!
//! Values are stored as JSON so a cached entry can be read straight out of
//! `redis-cli` when debugging.

use thiserror::Error;

use super::CacheError;
use crate::catalogue::Game;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

impl From<SerializationError> for CacheError {
    fn from(err: SerializationError) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a game to JSON bytes.
pub fn serialize_game(game: &Game) -> Result<Vec<u8>> {
    serde_json::to_vec(game).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a game.
pub fn deserialize_game(bytes: &[u8]) -> Result<Game> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes a page of games to JSON bytes.
pub fn serialize_games(games: &[Game]) -> Result<Vec<u8>> {
    serde_json::to_vec(games).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a page of games.
pub fn deserialize_games(bytes: &[u8]) -> Result<Vec<Game>> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
