//! Catalog operations over the manual book DAO
//!
//! The service owns the connection lifecycle: each operation borrows one
//! pooled connection and hands it to the DAO for the duration of the call.

use chrono::{DateTime, Utc};

use crate::error::{AppError, AppResult};
use crate::models::{Book, BookForm};
use crate::repository::books::BookDao;
use crate::repository::Repository;

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    dao: BookDao,
}

impl BooksService {
    pub fn new(repository: Repository, dao: BookDao) -> Self {
        Self { repository, dao }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Book>> {
        let mut conn = self.repository.acquire().await?;
        self.dao.find_all(&mut conn).await
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let mut conn = self.repository.acquire().await?;
        self.dao.find_by_id(id, &mut conn).await
    }

    pub async fn find_by_title(&self, title: &str) -> AppResult<Option<Book>> {
        let mut conn = self.repository.acquire().await?;
        self.dao.find_by_title(title, &mut conn).await
    }

    /// Create a book after the duplicate-title check.
    ///
    /// Title uniqueness lives here, not in the schema: the `books` table
    /// carries no unique constraint on `title`.
    pub async fn create(&self, form: &BookForm) -> AppResult<Book> {
        let mut conn = self.repository.acquire().await?;

        if self.dao.find_by_title(&form.title, &mut conn).await?.is_some() {
            return Err(AppError::Conflict("This title is already taken".to_string()));
        }

        self.dao.save(Book::new(form.title.clone()), &mut conn).await
    }

    /// Retitle an existing book.
    pub async fn update(&self, id: i64, form: &BookForm) -> AppResult<()> {
        let mut conn = self.repository.acquire().await?;

        if self.dao.find_by_id(id, &mut conn).await?.is_none() {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        self.dao.update(id, &form.title, &mut conn).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut conn = self.repository.acquire().await?;
        self.dao.delete(id, &mut conn).await
    }

    pub async fn find_between_dates(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<Book>> {
        let mut conn = self.repository.acquire().await?;
        self.dao.find_between_dates(from, to, &mut conn).await
    }
}
