//! Book entity and form payloads

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use validator::Validate;

/// A catalog record backed by the `books` table.
///
/// `id` and both timestamps are server-assigned: they are `None` on a freshly
/// constructed entity and populated when the row is read back. `version` is
/// bumped by the update statement on every write; it is stored but not
/// checked before writes.
#[derive(Debug, Clone, Serialize)]
pub struct Book {
    pub id: Option<i64>,
    pub title: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub version: i32,
}

impl Book {
    /// A not-yet-persisted book carrying only its title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            created_at: None,
            updated_at: None,
            version: 0,
        }
    }
}

/// Row mapping reads every column by name so that reordering columns in a
/// statement never silently shuffles fields. Read failures propagate as-is.
impl<'r> FromRow<'r, PgRow> for Book {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: Some(row.try_get("id")?),
            title: row.try_get("title")?,
            created_at: Some(row.try_get("created_at")?),
            updated_at: Some(row.try_get("updated_at")?),
            version: row.try_get("version")?,
        })
    }
}

/// Payload submitted by the new/edit book forms.
#[derive(Debug, Clone, serde::Deserialize, Validate)]
pub struct BookForm {
    #[validate(length(min = 1, max = 255, message = "Title must not be empty"))]
    pub title: String,
}
