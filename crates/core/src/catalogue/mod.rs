mod cached;
mod error;
mod mock_data;
mod requests;
mod types;
mod validation;

pub use cached::CatalogueCache;
pub use error::{CatalogueError, Result};
pub use mock_data::generate_seed_games;
pub use requests::GamePayload;
pub use types::{Game, GameId, GameInput};
pub use validation::{
    is_valid_url, parse_release_at, FieldError, GameValidator, Validator, MAX_FIELD_LENGTH,
    MIN_NAME_LENGTH,
};
