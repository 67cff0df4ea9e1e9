//! Serde helper functions for request payloads.
//!
//! Clients (and HTML forms behind them) routinely send empty strings for
//! fields they mean to leave out; these helpers fold those into `None`.

use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}
