//! Registration and credential verification

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{AppError, AppResult};
use crate::models::{RegisterForm, Role, User};
use crate::repository::Repository;

/// Hash a password using Argon2 with a random salt.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored Argon2 hash.
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new account.
    ///
    /// Only username and password are taken from the form; any submitted
    /// role is discarded and `ROLE_USER` is assigned here. The password is
    /// hashed before it reaches the store.
    pub async fn register(&self, form: &RegisterForm) -> AppResult<User> {
        if self.repository.users.username_exists(&form.username).await? {
            return Err(AppError::Conflict("This username is already taken".to_string()));
        }

        let user = User {
            username: form.username.clone(),
            password: hash_password(&form.password)?,
            role: Role::User,
        };
        self.repository.users.insert(&user).await?;

        tracing::info!(username = %user.username, "user registered");
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.repository.users.find_by_username(username).await
    }

    /// Check credentials; unknown user and wrong password give the same
    /// `None` answer.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<Option<User>> {
        let Some(user) = self.repository.users.find_by_username(username).await? else {
            return Ok(None);
        };

        if verify_password(password, &user.password)? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hash = hash_password("mysecret").unwrap();
        assert!(verify_password("mysecret", &hash).unwrap());
        assert!(!verify_password("wrongpassword", &hash).unwrap());
    }

    #[test]
    fn hash_never_stores_plaintext() {
        let hash = hash_password("pw123").unwrap();
        assert_ne!(hash, "pw123");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn different_passwords_different_hashes() {
        let h1 = hash_password("password1").unwrap();
        let h2 = hash_password("password2").unwrap();
        assert_ne!(h1, h2);
    }
}
