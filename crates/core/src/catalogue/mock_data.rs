//! Seed data for development and tests.

use chrono::{NaiveDate, TimeZone, Utc};

use super::types::GameInput;

/// Generate `count` demo games.
///
/// Game `n` (1-based) is titled "VR Game n" by "Studio n", released on the
/// first day of a month between 2020 and 2023. Output is deterministic so
/// seeded databases look the same on every run.
///
/// # Example
///
/// ```
/// use catalogue_core::catalogue::generate_seed_games;
///
/// let games = generate_seed_games(10);
///
/// assert_eq!(games.len(), 10);
/// assert_eq!(games[0].title, "VR Game 1");
/// ```
pub fn generate_seed_games(count: u32) -> Vec<GameInput> {
    (1..=count)
        .map(|n| {
            let mut input = GameInput::new(format!("VR Game {n}"), format!("Studio {n}"))
                .with_description(format!(
                    "This is the description of VR game number {n}. An immersive virtual reality game!"
                ));

            let year = 2020 + (n % 4) as i32;
            let month = (n - 1) % 9 + 1;
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
            {
                input = input.with_release_at(Utc.from_utc_datetime(&date));
            }

            input
        })
        .collect()
}
