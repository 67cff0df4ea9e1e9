//! Game CRUD handlers.
//!
//! Every handler checks access first, then parses and validates the
//! request, and only then calls the cached catalogue.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use catalogue_core::auth::Capability;
use catalogue_core::catalogue::{Game, GameId, GameInput, GamePayload};

use super::{
    authz::require,
    error::{error_response, AppError, ValidationError},
};
use crate::{auth::MaybeUser, models::ListGamesQuery, state::AppState};

fn bad_request(rejection: impl std::fmt::Display) -> Response {
    error_response(StatusCode::BAD_REQUEST, rejection.to_string())
}

/// A path id that is not an integer cannot name a game.
fn game_id(path: Result<Path<i64>, PathRejection>) -> Result<GameId, Response> {
    path.map(|Path(id)| GameId(id))
        .map_err(|_| error_response(StatusCode::NOT_FOUND, "Game not found"))
}

/// Validates a payload and converts it into a game input.
fn validated_input(
    state: &AppState,
    payload: GamePayload,
) -> Result<GameInput, Response> {
    let violations = state.validator.validate(&payload);
    if !violations.is_empty() {
        return Err(ValidationError(violations).into_response());
    }

    payload.into_input().ok_or_else(|| {
        error_response(StatusCode::UNPROCESSABLE_ENTITY, "Invalid game payload")
    })
}

/// List games (GET /api/games?page&limit).
pub async fn list_games(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    query: Result<Query<ListGamesQuery>, QueryRejection>,
) -> Result<Json<Vec<Game>>, Response> {
    require(&state, user.as_ref(), Capability::ReadCatalogue)
        .map_err(IntoResponse::into_response)?;

    let Query(query) = query.map_err(bad_request)?;
    let page = query
        .into_page()
        .map_err(|e| AppError::from(e).into_response())?;

    let games = state
        .catalogue
        .get_list(page)
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    Ok(Json(games))
}

/// Get a single game by ID (GET /api/games/{id}).
pub async fn get_game(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Game>, Response> {
    require(&state, user.as_ref(), Capability::ReadCatalogue)
        .map_err(IntoResponse::into_response)?;

    let id = game_id(path)?;

    let game = state
        .catalogue
        .get_detail(id)
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    Ok(Json(game))
}

/// Create a new game (POST /api/games).
pub async fn create_game(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    body: Result<Json<GamePayload>, JsonRejection>,
) -> Result<impl IntoResponse, Response> {
    require(&state, user.as_ref(), Capability::WriteCatalogue)
        .map_err(IntoResponse::into_response)?;

    let Json(payload) = body.map_err(bad_request)?;
    let input = validated_input(&state, payload)?;

    let game = state
        .catalogue
        .create(&input)
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    tracing::info!(game_id = %game.id, title = %game.title, "Created game");

    Ok((StatusCode::CREATED, Json(game)))
}

/// Update a game by ID (PUT /api/games/{id}).
///
/// Fields absent from the body keep their current value.
pub async fn update_game(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<GamePayload>, JsonRejection>,
) -> Result<Json<Game>, Response> {
    require(&state, user.as_ref(), Capability::WriteCatalogue)
        .map_err(IntoResponse::into_response)?;

    let Json(payload) = body.map_err(bad_request)?;
    let id = game_id(path)?;

    let current = state
        .catalogue
        .get_detail(id)
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    let input = validated_input(&state, payload.merged_with(&current))?;

    let game = state
        .catalogue
        .update(id, &input)
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    tracing::info!(game_id = %id, "Updated game");

    Ok(Json(game))
}

/// Delete a game by ID (DELETE /api/games/{id}).
pub async fn delete_game(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, Response> {
    require(&state, user.as_ref(), Capability::WriteCatalogue)
        .map_err(IntoResponse::into_response)?;

    let id = game_id(path)?;

    state
        .catalogue
        .delete(id)
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    tracing::info!(game_id = %id, "Deleted game");

    Ok(StatusCode::NO_CONTENT)
}
