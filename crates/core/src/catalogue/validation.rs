//! Field-level validation of game payloads.
//!
//! Validation runs in the HTTP layer before the catalogue is touched; the
//! cache core only ever sees inputs that passed these rules.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::requests::GamePayload;

/// Minimum length of title and studio, in characters.
pub const MIN_NAME_LENGTH: usize = 2;
/// Maximum length of title, studio and picture, in characters.
pub const MAX_FIELD_LENGTH: usize = 255;

/// A single rule violation on a named field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Checks a payload and reports every violated rule.
///
/// An empty result means the payload can be turned into a `GameInput`.
pub trait Validator: Send + Sync {
    fn validate(&self, payload: &GamePayload) -> Vec<FieldError>;
}

/// The catalogue's game rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameValidator;

impl Validator for GameValidator {
    fn validate(&self, payload: &GamePayload) -> Vec<FieldError> {
        let mut errors = Vec::new();

        validate_name(&mut errors, "title", "Title", payload.title.as_deref());
        validate_name(&mut errors, "studio", "Studio", payload.studio.as_deref());

        if let Some(raw) = payload.release_at.as_deref() {
            if parse_release_at(raw).is_none() {
                errors.push(FieldError::new(
                    "release_at",
                    "Release date must be a valid date.",
                ));
            }
        }

        if let Some(picture) = payload.picture.as_deref() {
            if picture.chars().count() > MAX_FIELD_LENGTH {
                errors.push(FieldError::new(
                    "picture",
                    format!("Picture URL cannot be longer than {MAX_FIELD_LENGTH} characters."),
                ));
            } else if !is_valid_url(picture) {
                errors.push(FieldError::new("picture", "Picture must be a valid URL."));
            }
        }

        errors
    }
}

fn validate_name(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    label: &str,
    value: Option<&str>,
) {
    let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
        errors.push(FieldError::new(field, format!("{label} is required.")));
        return;
    };

    let length = value.chars().count();
    if length < MIN_NAME_LENGTH {
        errors.push(FieldError::new(
            field,
            format!("{label} must be at least {MIN_NAME_LENGTH} characters long."),
        ));
    } else if length > MAX_FIELD_LENGTH {
        errors.push(FieldError::new(
            field,
            format!("{label} cannot be longer than {MAX_FIELD_LENGTH} characters."),
        ));
    }
}

/// Parses a release date given either as RFC 3339 or as `YYYY-MM-DD`.
///
/// Plain dates are taken as midnight UTC.
pub fn parse_release_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Returns true for absolute http(s) URLs with a host.
pub fn is_valid_url(raw: &str) -> bool {
    match url::Url::parse(raw) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn payload(title: &str, studio: &str) -> GamePayload {
        GamePayload::new(title, studio)
    }

    fn fields(errors: &[FieldError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_valid_payload_has_no_errors() {
        let p = payload("Moss", "Polyarc")
            .with_release_at("2018-02-27")
            .with_picture("https://example.com/moss.jpg");

        assert!(GameValidator.validate(&p).is_empty());
    }

    #[test]
    fn test_missing_title_is_reported() {
        let p = GamePayload {
            studio: Some("New Studio".to_string()),
            ..GamePayload::default()
        };

        let errors = GameValidator.validate(&p);

        assert_eq!(fields(&errors), vec!["title"]);
        assert_eq!(errors[0].message, "Title is required.");
    }

    #[test]
    fn test_blank_title_is_reported() {
        let errors = GameValidator.validate(&payload("   ", "Studio"));
        assert_eq!(fields(&errors), vec!["title"]);
    }

    #[test]
    fn test_short_and_long_names() {
        let long = "x".repeat(MAX_FIELD_LENGTH + 1);
        let errors = GameValidator.validate(&payload("A", &long));

        assert_eq!(fields(&errors), vec!["title", "studio"]);
        assert!(errors[0].message.contains("at least 2"));
        assert!(errors[1].message.contains("255"));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 255 two-byte characters is still within bounds.
        let title = "é".repeat(MAX_FIELD_LENGTH);
        assert!(GameValidator.validate(&payload(&title, "Studio")).is_empty());
    }

    #[test]
    fn test_invalid_release_date() {
        let p = payload("Game", "Studio").with_release_at("2023-13-45");
        assert_eq!(fields(&GameValidator.validate(&p)), vec!["release_at"]);
    }

    #[test]
    fn test_invalid_picture_url() {
        let p = payload("Game", "Studio").with_picture("not a url");
        assert_eq!(fields(&GameValidator.validate(&p)), vec!["picture"]);

        let p = payload("Game", "Studio").with_picture("ftp://example.com/x.png");
        assert_eq!(fields(&GameValidator.validate(&p)), vec!["picture"]);
    }

    #[test]
    fn test_parse_release_at_formats() {
        let midnight = Utc.with_ymd_and_hms(2022, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_release_at("2022-05-01"), Some(midnight));
        assert_eq!(parse_release_at("2022-05-01T00:00:00Z"), Some(midnight));
        assert_eq!(
            parse_release_at("2022-05-01T02:00:00+02:00"),
            Some(midnight)
        );
        assert_eq!(parse_release_at("yesterday"), None);
    }
}
