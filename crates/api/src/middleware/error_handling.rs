//! # Error Handling Middleware
//!
//! Maps `BeepError` onto HTTP status codes with a `{"error": message}` body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use beep_core::errors::BeepError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping.
///
/// Handlers return `Result<_, AppError>` so that `?` works on both
/// `BeepError` and repository `eyre::Report` values.
#[derive(Debug)]
pub struct AppError(pub BeepError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BeepError::NotFound(_) => StatusCode::NOT_FOUND,
            BeepError::Validation(_) => StatusCode::BAD_REQUEST,
            BeepError::Authentication(_) => StatusCode::UNAUTHORIZED,
            BeepError::Authorization(_) => StatusCode::FORBIDDEN,
            BeepError::Conflict(_) => StatusCode::CONFLICT,
            BeepError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BeepError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();

        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<BeepError> for AppError {
    fn from(err: BeepError) -> Self {
        AppError(err)
    }
}

/// Repository failures surface as `BeepError::Database`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BeepError::Database(err))
    }
}

/// Turns a unique-constraint failure into `Conflict`, anything else into `Database`.
pub fn conflict_or_database(err: eyre::Report, conflict_message: &str) -> BeepError {
    if beep_db::is_unique_violation(&err) {
        BeepError::Conflict(conflict_message.to_string())
    } else {
        BeepError::Database(err)
    }
}
