//! API request types for game operations.
//!
//! Pure data shared by the server and its tests. A payload is the raw,
//! unvalidated body of a create or update request.

use serde::{Deserialize, Serialize};

use super::types::{Game, GameInput};
use super::validation::parse_release_at;
use crate::serde::deserialize_optional_string;

/// Raw body of `POST /api/games` and `PUT /api/games/{id}`.
///
/// Every field is optional so that validation can report all missing ones at
/// once instead of failing on the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub release_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub studio: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub picture: Option<String>,
}

impl GamePayload {
    /// Create a payload with the two required fields.
    pub fn new(title: impl Into<String>, studio: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            studio: Some(studio.into()),
            ..Self::default()
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the release date (RFC 3339 or `YYYY-MM-DD`).
    pub fn with_release_at(mut self, release_at: impl Into<String>) -> Self {
        self.release_at = Some(release_at.into());
        self
    }

    /// Set the picture URL.
    pub fn with_picture(mut self, picture: impl Into<String>) -> Self {
        self.picture = Some(picture.into());
        self
    }

    /// Fills every field absent from this payload with the current value.
    ///
    /// Updates are partial: `{"title": "New"}` keeps the studio, description,
    /// release date and picture of `current`. A field sent as an empty string
    /// still counts as present for `title` and `studio`, so blanking one of them
    /// fails validation instead of being ignored.
    pub fn merged_with(self, current: &Game) -> Self {
        Self {
            title: self.title.or_else(|| Some(current.title.clone())),
            description: self.description.or_else(|| current.description.clone()),
            release_at: self
                .release_at
                .or_else(|| current.release_at.map(|dt| dt.to_rfc3339())),
            studio: self.studio.or_else(|| Some(current.studio.clone())),
            picture: self.picture.or_else(|| current.picture.clone()),
        }
    }

    /// Converts the payload into a game input.
    ///
    /// Returns None if a required field is missing or the release date does
    /// not parse. Run a [`Validator`](super::Validator) first to get the
    /// reasons.
    pub fn into_input(self) -> Option<GameInput> {
        let release_at = match self.release_at {
            Some(raw) => Some(parse_release_at(&raw)?),
            None => None,
        };

        Some(GameInput {
            title: self.title?,
            description: self.description,
            release_at,
            studio: self.studio?,
            picture: self.picture,
        })
    }
}
