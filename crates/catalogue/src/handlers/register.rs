//! User registration (POST /api/register).

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use catalogue_core::auth::{generate_api_token, validate_registration, RegisterRequest, User};

use super::error::{error_response, AppError, ValidationError};
use crate::{auth::hash_password, models::RegisterResponse, state::AppState};

/// Emails are compared and stored trimmed and lowercased.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Register a new user with `ROLE_USER` and return its API token.
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, Response> {
    let Json(request) =
        body.map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?;

    let violations = validate_registration(&request);
    if !violations.is_empty() {
        return Err(ValidationError(violations).into_response());
    }

    let email = normalize_email(&request.email);
    let existing = state
        .users
        .get_user_by_email(&email)
        .await
        .map_err(|e| AppError::from(e).into_response())?;
    if existing.is_some() {
        return Err(error_response(
            StatusCode::CONFLICT,
            "Email is already registered.",
        ));
    }

    let password_hash = hash_password(request.password)
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    let user = User::new(
        request.pseudo.trim(),
        email,
        password_hash,
        generate_api_token(),
    );

    state
        .users
        .create_user(&user)
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    tracing::info!(user_id = %user.id, pseudo = %user.pseudo, "Registered user");

    Ok((StatusCode::CREATED, Json(RegisterResponse::new(user))))
}
