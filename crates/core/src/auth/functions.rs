use rand::{distr::Alphanumeric, Rng};

use super::ApiToken;

/// Length of generated API tokens.
pub const API_TOKEN_LENGTH: usize = 32;

/// Generate a cryptographically random API token.
pub fn generate_api_token() -> ApiToken {
    let token: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(API_TOKEN_LENGTH)
        .map(char::from)
        .collect();
    ApiToken::new(token)
}

/// Extracts the token from an `Authorization` header value.
///
/// Accepts `Bearer <token>` with any casing of the scheme. Returns None for
/// other schemes or an empty token.
pub fn parse_bearer(header: &str) -> Option<ApiToken> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    Some(ApiToken::new(token))
}
