use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        games::{create_game, delete_game, get_game, list_games, update_game},
        health::{healthz, livez},
        register::register,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // API routes with CORS
    let api_routes = Router::new()
        .route("/games", get(list_games).post(create_game))
        .route(
            "/games/{id}",
            get(get_game).put(update_game).delete(delete_game),
        )
        .route("/register", post(register))
        .layer(cors);

    // Main application router
    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, response::Response};
    use catalogue_core::auth::{ApiToken, Role, User};
    use catalogue_core::catalogue::{Game, GameInput};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const ADMIN_TOKEN: &str = "admin-token";
    const USER_TOKEN: &str = "user-token";

    /// State with one admin, one plain user and `games` seeded games.
    async fn setup(games: u32) -> AppState {
        let state = AppState::default();
        let admin = User::new("splint", "splint@test.fr", "hash", ApiToken::new(ADMIN_TOKEN))
            .with_role(Role::Admin);
        let user = User::new("user1", "user1@test.fr", "hash", ApiToken::new(USER_TOKEN));
        state.users.create_user(&admin).await.unwrap();
        state.users.create_user(&user).await.unwrap();

        for n in 1..=games {
            state
                .catalogue
                .create(&GameInput::new(format!("VR Game {n}"), format!("Studio {n}")))
                .await
                .unwrap();
        }
        state
    }

    async fn send(
        state: &AppState,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        create_app(state.clone())
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_livez() {
        let state = setup(0).await;
        let response = send(&state, "GET", "/livez", None, None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_healthz_reports_count_and_backends() {
        let state = setup(3).await;

        let response = send(&state, "GET", "/healthz", None, None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["games"], 3);
        assert_eq!(json["cache_backend"], crate::cache::BACKEND_NAME);
        assert_eq!(json["storage_backend"], crate::storage::BACKEND_NAME);
    }

    #[tokio::test]
    async fn test_list_requires_authentication() {
        let state = setup(1).await;

        let response = send(&state, "GET", "/api/games", None, None).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthorized() {
        let state = setup(1).await;
        let response = send(&state, "GET", "/api/games", Some("bogus"), None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_list_paginates_for_any_user() {
        let state = setup(12).await;

        let first = send(&state, "GET", "/api/games", Some(USER_TOKEN), None).await;
        assert_eq!(first.status(), StatusCode::OK);
        let first: Vec<Game> = serde_json::from_value(body_json(first).await).unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(first[0].title, "VR Game 1");

        let second = send(
            &state,
            "GET",
            "/api/games?page=2&limit=10",
            Some(USER_TOKEN),
            None,
        )
        .await;
        let second: Vec<Game> = serde_json::from_value(body_json(second).await).unwrap();
        let titles: Vec<_> = second.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["VR Game 11", "VR Game 12"]);
    }

    #[tokio::test]
    async fn test_list_rejects_bad_paging() {
        let state = setup(1).await;

        for uri in [
            "/api/games?page=0",
            "/api/games?limit=101",
            "/api/games?page=abc",
        ] {
            let response = send(&state, "GET", uri, Some(USER_TOKEN), None).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_get_game_and_missing_game() {
        let state = setup(2).await;

        let found = send(&state, "GET", "/api/games/2", Some(USER_TOKEN), None).await;
        assert_eq!(found.status(), StatusCode::OK);
        assert_eq!(body_json(found).await["title"], "VR Game 2");

        let missing = send(&state, "GET", "/api/games/99", Some(USER_TOKEN), None).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(missing).await,
            json!({ "error": "Game not found: 99" })
        );

        let not_numeric = send(&state, "GET", "/api/games/abc", Some(USER_TOKEN), None).await;
        assert_eq!(not_numeric.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_creates_game() {
        let state = setup(0).await;
        let body = r#"{
            "title": "Half-Life: Alyx",
            "studio": "Valve",
            "release_at": "2020-03-23",
            "picture": "https://example.com/alyx.png"
        }"#;

        let response = send(&state, "POST", "/api/games", Some(ADMIN_TOKEN), Some(body)).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let game: Game = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(game.title, "Half-Life: Alyx");
        assert!(game.release_at.is_some());

        let fetched = send(
            &state,
            "GET",
            &format!("/api/games/{}", game.id),
            Some(USER_TOKEN),
            None,
        )
        .await;
        assert_eq!(fetched.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_writes_are_forbidden_for_plain_users() {
        let state = setup(1).await;
        let body = r#"{"title":"Game","studio":"Studio"}"#;

        let create = send(&state, "POST", "/api/games", Some(USER_TOKEN), Some(body)).await;
        let update = send(&state, "PUT", "/api/games/1", Some(USER_TOKEN), Some(body)).await;
        let delete = send(&state, "DELETE", "/api/games/1", Some(USER_TOKEN), None).await;

        assert_eq!(create.status(), StatusCode::FORBIDDEN);
        assert_eq!(update.status(), StatusCode::FORBIDDEN);
        assert_eq!(delete.status(), StatusCode::FORBIDDEN);
        assert_eq!(state.store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_writes_require_authentication() {
        let state = setup(1).await;
        let body = r#"{"title":"Game","studio":"Studio"}"#;

        let create = send(&state, "POST", "/api/games", None, Some(body)).await;
        let delete = send(&state, "DELETE", "/api/games/1", None, None).await;

        assert_eq!(create.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(delete.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_authorization_is_checked_before_body() {
        let state = setup(0).await;

        let response = send(
            &state,
            "POST",
            "/api/games",
            Some(USER_TOKEN),
            Some("{not json"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let state = setup(0).await;

        let syntax = send(
            &state,
            "POST",
            "/api/games",
            Some(ADMIN_TOKEN),
            Some("{not json"),
        )
        .await;
        let wrong_type = send(
            &state,
            "POST",
            "/api/games",
            Some(ADMIN_TOKEN),
            Some(r#"{"title": 5}"#),
        )
        .await;

        assert_eq!(syntax.status(), StatusCode::BAD_REQUEST);
        assert_eq!(wrong_type.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_payload_lists_violations() {
        let state = setup(0).await;
        let body = r#"{"title":"","picture":"not a url"}"#;

        let response = send(&state, "POST", "/api/games", Some(ADMIN_TOKEN), Some(body)).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        let fields: Vec<&str> = json["violations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["field"].as_str().unwrap())
            .collect();
        assert!(fields.contains(&"title"));
        assert!(fields.contains(&"studio"));
        assert!(fields.contains(&"picture"));
        assert_eq!(state.store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let state = setup(1).await;

        let response = send(
            &state,
            "PUT",
            "/api/games/1",
            Some(ADMIN_TOKEN),
            Some(r#"{"title":"Renamed"}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["title"], "Renamed");
        assert_eq!(json["studio"], "Studio 1");
    }

    #[tokio::test]
    async fn test_update_missing_game_is_not_found_before_validation() {
        let state = setup(0).await;

        let response = send(
            &state,
            "PUT",
            "/api/games/42",
            Some(ADMIN_TOKEN),
            Some(r#"{"title":""}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_with_invalid_field_is_unprocessable() {
        let state = setup(1).await;

        let response = send(
            &state,
            "PUT",
            "/api/games/1",
            Some(ADMIN_TOKEN),
            Some(r#"{"release_at":"someday"}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let state = setup(2).await;

        // Warm the cache for both reads.
        send(&state, "GET", "/api/games/2", Some(USER_TOKEN), None).await;
        send(&state, "GET", "/api/games", Some(USER_TOKEN), None).await;

        let deleted = send(&state, "DELETE", "/api/games/2", Some(ADMIN_TOKEN), None).await;
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let detail = send(&state, "GET", "/api/games/2", Some(USER_TOKEN), None).await;
        assert_eq!(detail.status(), StatusCode::NOT_FOUND);

        let list = send(&state, "GET", "/api/games", Some(USER_TOKEN), None).await;
        let list: Vec<Game> = serde_json::from_value(body_json(list).await).unwrap();
        assert_eq!(list.len(), 1);

        let again = send(&state, "DELETE", "/api/games/2", Some(ADMIN_TOKEN), None).await;
        assert_eq!(again.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_invalidates_cached_list() {
        let state = setup(1).await;
        send(&state, "GET", "/api/games?page=1&limit=10", Some(USER_TOKEN), None).await;

        send(
            &state,
            "POST",
            "/api/games",
            Some(ADMIN_TOKEN),
            Some(r#"{"title":"New Game","studio":"New Studio"}"#),
        )
        .await;

        let list = send(&state, "GET", "/api/games?page=1&limit=10", Some(USER_TOKEN), None).await;
        let list: Vec<Game> = serde_json::from_value(body_json(list).await).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[tokio::test]
    async fn test_register_returns_token_that_authenticates() {
        let state = setup(1).await;
        let body = r#"{"pseudo":"newbie","email":"Newbie@Test.fr","password":"secret"}"#;

        let response = send(&state, "POST", "/api/register", None, Some(body)).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["user"]["email"], "newbie@test.fr");
        assert_eq!(json["user"]["roles"], json!(["ROLE_USER"]));
        assert!(json["user"].get("password_hash").is_none());

        let token = json["token"].as_str().unwrap();
        let list = send(&state, "GET", "/api/games", Some(token), None).await;
        assert_eq!(list.status(), StatusCode::OK);

        let create = send(
            &state,
            "POST",
            "/api/games",
            Some(token),
            Some(r#"{"title":"Game","studio":"Studio"}"#),
        )
        .await;
        assert_eq!(create.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_register_rejects_taken_email() {
        let state = setup(0).await;
        let body = r#"{"pseudo":"user2","email":"USER1@test.fr","password":"secret"}"#;

        let response = send(&state, "POST", "/api/register", None, Some(body)).await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_register_validates_and_parses_body() {
        let state = setup(0).await;

        let invalid = send(
            &state,
            "POST",
            "/api/register",
            None,
            Some(r#"{"pseudo":"x","email":"nope","password":"1"}"#),
        )
        .await;
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(invalid).await;
        assert_eq!(json["violations"].as_array().unwrap().len(), 3);

        let malformed = send(&state, "POST", "/api/register", None, Some("{broken")).await;
        assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
    }
}
