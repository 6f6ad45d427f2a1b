//! Public JSON endpoints under `/api`

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::Book;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
}

/// GET /api/health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/ready (checks database connectivity)
pub async fn readiness_check(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    state.services.books.find_all().await?;
    Ok(Json(HealthResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    /// RFC 3339 instant, inclusive lower bound on `created_at`.
    pub from: DateTime<Utc>,
    /// RFC 3339 instant, inclusive upper bound on `created_at`.
    pub to: DateTime<Utc>,
}

/// GET /api/books?from=&to= - books created inside the given range.
pub async fn books_between(
    State(state): State<AppState>,
    Query(range): Query<DateRangeQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state
        .services
        .books
        .find_between_dates(range.from, range.to)
        .await?;
    Ok(Json(books))
}
