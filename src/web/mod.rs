//! Web layer: route handlers, views and the authorization gate

pub mod api;
pub mod auth;
pub mod books;
pub mod policy;
pub mod views;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts, http::StatusCode};
use axum::response::IntoResponse;

use crate::{error::AppError, models::SessionUser, AppState};

/// Extractor for the session principal the policy gate attached to the
/// request. Handlers behind the gate can rely on it being present.
pub struct CurrentUser(pub SessionUser);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AppError::Authentication("No active session".to_string()))
    }
}

/// Flatten `validator` output into the messages a form re-render shows.
pub fn validation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|field| field.iter())
        .map(|e| {
            e.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| "Invalid value".to_string())
        })
        .collect();
    messages.sort();
    messages
}

/// The generic failure page served at `/error`.
pub async fn generic_error() -> impl IntoResponse {
    views::error_page(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
}
