//! Request authentication for the HTTP layer.
//!
//! Resolves the bearer token of a request to a stored user and hashes
//! passwords for registration and fixtures.

mod extractor;
mod password;

pub use extractor::MaybeUser;
pub use password::hash_password;
