mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{game_key, game_list_key, tag_tracking_key, CATALOGUE_TAG};
pub use serialization::{
    deserialize_game, deserialize_games, serialize_game, serialize_games, SerializationError,
};
pub use traits::KeyValueCache;
