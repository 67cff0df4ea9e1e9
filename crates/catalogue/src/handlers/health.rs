//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Store reachability plus the compiled-in backends

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::error::error_response;
use crate::{cache, state::AppState, storage};

/// Body of a healthy `/healthz`.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// Number of games in the store.
    pub games: u64,
    pub cache_backend: &'static str,
    pub storage_backend: &'static str,
}

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately. Used to check if the server is accepting connections.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Counts the games to prove the store answers.
///
/// Returns 503 when the store fails.
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Response {
    match state.store.count().await {
        Ok(games) => (
            StatusCode::OK,
            Json(HealthStatus {
                games,
                cache_backend: cache::BACKEND_NAME,
                storage_backend: storage::BACKEND_NAME,
            }),
        )
            .into_response(),
        Err(e) => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            format!("Store unavailable: {e}"),
        ),
    }
}
