//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::error::AppResult;
use crate::models::User;

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Look up a user by their username.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, password, role FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Check if a username is already taken.
    pub async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Persist a new user record.
    pub async fn insert(&self, user: &User) -> AppResult<()> {
        sqlx::query("INSERT INTO users (username, password, role) VALUES ($1, $2, $3)")
            .bind(&user.username)
            .bind(&user.password)
            .bind(user.role)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
