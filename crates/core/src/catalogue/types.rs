use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub i64);

impl GameId {
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for GameId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A game in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub title: String,
    pub description: Option<String>,
    pub release_at: Option<DateTime<Utc>>,
    pub studio: String,
    /// Cover picture (absolute URL).
    pub picture: Option<String>,
}

impl Game {
    /// Builds the persisted form of `input` under the given id.
    pub fn from_input(id: GameId, input: GameInput) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            release_at: input.release_at,
            studio: input.studio,
            picture: input.picture,
        }
    }
}

/// The mutable fields of a game, already validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInput {
    pub title: String,
    pub description: Option<String>,
    pub release_at: Option<DateTime<Utc>>,
    pub studio: String,
    pub picture: Option<String>,
}

impl GameInput {
    /// Creates an input with the two required fields.
    pub fn new(title: impl Into<String>, studio: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            release_at: None,
            studio: studio.into(),
            picture: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the release timestamp.
    pub fn with_release_at(mut self, release_at: DateTime<Utc>) -> Self {
        self.release_at = Some(release_at);
        self
    }

    /// Sets the picture URL.
    pub fn with_picture(mut self, picture: impl Into<String>) -> Self {
        self.picture = Some(picture.into());
        self
    }
}
