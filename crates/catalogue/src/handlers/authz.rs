//! Authorization helpers for API handlers.
//!
//! Turns an access-control decision into 401 Unauthorized or 403 Forbidden.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use catalogue_core::auth::{AccessError, Capability, User};

use crate::state::AppState;

/// Authorization error that maps to HTTP 401 or 403.
#[derive(Debug)]
pub struct AuthzError {
    pub reason: AccessError,
    pub capability: Capability,
}

impl IntoResponse for AuthzError {
    fn into_response(self) -> Response {
        let status = match self.reason {
            AccessError::Unauthenticated => {
                tracing::warn!(capability = ?self.capability, "Authorization denied: no credentials");
                StatusCode::UNAUTHORIZED
            }
            AccessError::Forbidden => {
                tracing::warn!(capability = ?self.capability, "Authorization denied: insufficient role");
                StatusCode::FORBIDDEN
            }
        };

        (status, Json(json!({ "error": self.reason.to_string() }))).into_response()
    }
}

/// Requires `capability` for the caller.
pub fn require(
    state: &AppState,
    user: Option<&User>,
    capability: Capability,
) -> Result<(), AuthzError> {
    state
        .access
        .authorize(user, capability)
        .map_err(|reason| AuthzError { reason, capability })
}
