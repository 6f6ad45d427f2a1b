//! Error types for Biblios server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::web::views;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Failed or missing authentication lands back on the login form
            // with the error marker the form knows how to display.
            AppError::Authentication(_) => {
                Redirect::to("/auth/login?error").into_response()
            }
            AppError::Authorization(msg) => {
                views::error_page(StatusCode::FORBIDDEN, &msg).into_response()
            }
            AppError::NotFound(msg) => {
                views::error_page(StatusCode::NOT_FOUND, &msg).into_response()
            }
            AppError::Validation(msg) | AppError::Conflict(msg) => {
                views::error_page(StatusCode::BAD_REQUEST, &msg).into_response()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                views::error_page(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A storage error occurred",
                )
                .into_response()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                views::error_page(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                )
                .into_response()
            }
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
