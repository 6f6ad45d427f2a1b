//! Repository layer for database operations

pub mod books;
pub mod sql;
pub mod users;

use sqlx::pool::PoolConnection;
use sqlx::{Pool, Postgres};

use crate::error::AppResult;

/// Main repository struct holding the database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }

    /// Borrow a connection for the duration of one DAO call.
    ///
    /// The connection returns to the pool when the guard drops, so the
    /// caller controls the transaction boundary, not the DAO.
    pub async fn acquire(&self) -> AppResult<PoolConnection<Postgres>> {
        Ok(self.pool.acquire().await?)
    }
}
