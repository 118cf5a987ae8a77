//! Error types for the admin API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::forms::FieldErrors;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Invalid date-time: {0:?}")]
    InvalidTime(String),

    #[error("Invalid time window: start {start} is not before end {end}")]
    InvalidWindow { start: i64, end: i64 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "errors": errors }))).into_response()
            }
            AppError::InvalidTime(_) | AppError::InvalidWindow { .. } => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": self.to_string() }))).into_response()
            }
            AppError::NotFound(_) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": self.to_string() }))).into_response()
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "Database error" }))).into_response()
            }
            AppError::PasswordHash(ref e) => {
                tracing::error!("Password hashing failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "Internal error" }))).into_response()
            }
        }
    }
}
