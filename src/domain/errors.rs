//! Domain error types
//!
//! These errors are business-level failures. The single `IntoResponse`
//! impl at the bottom is the only place errors are mapped to HTTP
//! statuses; every handler propagates with `?`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum DomainError {
    /// Duplicate unique field on create
    Conflict(String),
    /// Bad credentials
    Unauthorized(String),
    /// Missing record by id or key
    NotFound(String),
    /// Missing required field
    BadRequest(String),
    /// Database/persistence error
    Database(String),
    /// Generic internal error
    Internal(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            DomainError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            DomainError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            DomainError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            DomainError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            DomainError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            DomainError::Database(msg) | DomainError::Internal(msg) => {
                tracing::error!("request failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
