//! Axum extractor for the caller's identity.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use catalogue_core::auth::{parse_bearer, ApiToken, User};

use crate::{handlers::AppError, state::AppState};

/// The user owning the request's bearer token, if any.
///
/// A missing header, a non-bearer scheme or an unknown token all yield
/// `MaybeUser(None)`; handlers decide through access control whether that
/// is acceptable. Only a failing user lookup rejects the request.
pub struct MaybeUser(pub Option<User>);

fn bearer_token(parts: &Parts) -> Option<ApiToken> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_bearer)
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Ok(Self(None));
        };

        let user = state.users.get_user_by_token(&token).await?;
        if user.is_none() {
            tracing::debug!("Bearer token does not match any user");
        }

        Ok(Self(user))
    }
}
