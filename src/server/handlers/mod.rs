// src/server/handlers/mod.rs
//! HTTP request handlers for the cookbook API

pub mod recipes;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tokio::task::JoinError;

/// Request-level failure; always a 500
///
/// Only store access can fail a request. Bad filter input and malformed
/// nutrients never reach this type.
#[derive(Debug)]
pub enum ApiError {
    /// Database could not be opened or queried
    Store(crate::Error),
    /// The blocking database task panicked or was cancelled
    Task(JoinError),
}

impl From<crate::Error> for ApiError {
    fn from(err: crate::Error) -> Self {
        ApiError::Store(err)
    }
}

impl From<JoinError> for ApiError {
    fn from(err: JoinError) -> Self {
        ApiError::Task(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (kind, message) = match &self {
            ApiError::Store(e) => {
                tracing::error!("Database error: {}", e);
                ("database_error", "Failed to query recipe store")
            }
            ApiError::Task(e) => {
                tracing::error!("Database task failed: {}", e);
                ("internal_error", "Request could not be completed")
            }
        };

        let body = serde_json::json!({
            "error": kind,
            "message": message,
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
