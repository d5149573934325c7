use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::constants::API_NAME;
use crate::models::Envelope;
use crate::repository::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(e) => AppError::Database(e),
            StoreError::Encoding(e) => AppError::Internal(e.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(msg) => {
                tracing::warn!("{} Validation error: {}", API_NAME, msg);
                Envelope::failure(StatusCode::BAD_REQUEST, "ValidationError", msg).into_response()
            }
            AppError::InvalidJson(msg) => {
                tracing::warn!("{} Invalid JSON: {}", API_NAME, msg);
                Envelope::failure(
                    StatusCode::BAD_REQUEST,
                    "ValidationError",
                    format!("Invalid JSON: {}", msg),
                )
                .into_response()
            }
            AppError::NotFound(msg) => {
                tracing::warn!("{} Not found: {}", API_NAME, msg);
                Envelope::failure(StatusCode::NOT_FOUND, "NotFoundError", msg).into_response()
            }
            AppError::Database(e) => {
                tracing::error!("{} Database error: {}", API_NAME, e);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {}", e))
                    .into_response()
            }
            AppError::Internal(e) => {
                tracing::error!("{} Internal error: {}", API_NAME, e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Internal server error: {}", e),
                )
                    .into_response()
            }
        }
    }
}

/// Fallback for requests that match no route. Plain text, not an envelope.
pub async fn path_not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Path not found")
}
