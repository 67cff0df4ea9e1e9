mod game;
mod user;

pub use game::ListGamesQuery;
pub use user::RegisterResponse;
