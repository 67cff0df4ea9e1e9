use serde::Serialize;

use catalogue_core::auth::{ApiToken, User};

/// Body of a successful `POST /api/register`.
///
/// The token is returned once, next to the user it authenticates.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: User,
    pub token: ApiToken,
}

impl RegisterResponse {
    pub fn new(user: User) -> Self {
        let token = user.api_token.clone();
        Self { user, token }
    }
}
