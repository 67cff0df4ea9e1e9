use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use catalogue_core::catalogue::{CatalogueError, FieldError};
use catalogue_core::storage::{
    catalogue_error_to_status_code, repository_error_to_status_code, PageError, RepositoryError,
};

/// Builds a `{"error": message}` response and logs it.
///
/// Client errors are logged at `warn`, server errors at `error`.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let message = message.into();
    if status.is_server_error() {
        tracing::error!(status = %status, message = %message, "API error");
    } else {
        tracing::warn!(status = %status, message = %message, "API error");
    }
    (status, Json(json!({ "error": message }))).into_response()
}

/// Application error type that wraps `anyhow::Error`.
///
/// This allows using `?` on functions that return `Result<_, anyhow::Error>`
/// to automatically convert them into `Result<_, AppError>`. Catalogue,
/// repository and paging errors keep their own status code; anything else
/// is a 500.
pub struct AppError(anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        let code = if let Some(err) = self.0.downcast_ref::<CatalogueError>() {
            catalogue_error_to_status_code(err)
        } else if let Some(err) = self.0.downcast_ref::<RepositoryError>() {
            repository_error_to_status_code(err)
        } else if self.0.downcast_ref::<PageError>().is_some() {
            400
        } else {
            500
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error_response(status, format!("Something went wrong: {}", self.0))
        } else {
            error_response(status, self.0.to_string())
        }
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Field violations of a request body, rendered as 422.
#[derive(Debug)]
pub struct ValidationError(pub Vec<FieldError>);

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        tracing::warn!(violations = self.0.len(), "Validation failed");
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "violations": self.0 })),
        )
            .into_response()
    }
}
