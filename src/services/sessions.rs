//! Redis-backed session store
//!
//! The cookie carries a random token; only the SHA-256 digest of that token
//! is used as the store key, so a leaked store dump cannot be replayed as
//! live cookies. Entries expire through the store's TTL.

use rand::Rng;
use redis::{AsyncCommands, Client};
use sha2::{Digest, Sha256};

use crate::config::SessionConfig;
use crate::error::{AppError, AppResult};
use crate::models::SessionUser;

/// Generate a cryptographically random session token.
pub fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.gen();
    hex::encode(bytes)
}

fn store_key(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("session:{}", hex::encode(hasher.finalize()))
}

#[derive(Clone)]
pub struct SessionService {
    client: Client,
    config: SessionConfig,
}

impl SessionService {
    /// Create a new session service
    pub async fn new(url: &str, config: SessionConfig) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        // Test connection
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))
    }

    /// Open a session for an authenticated user and return its token.
    pub async fn create(&self, user: &SessionUser) -> AppResult<String> {
        let token = generate_token();
        let payload = serde_json::to_string(user)
            .map_err(|e| AppError::Internal(format!("Failed to serialize session: {}", e)))?;

        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(store_key(&token), payload, self.config.ttl_seconds)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store session: {}", e)))?;

        Ok(token)
    }

    /// Resolve a token to its principal; expired or unknown tokens are `None`.
    pub async fn get(&self, token: &str) -> AppResult<Option<SessionUser>> {
        let mut conn = self.connection().await?;
        let payload: Option<String> = conn
            .get(store_key(token))
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read session: {}", e)))?;

        match payload {
            // A payload that no longer parses counts as no session.
            Some(json) => Ok(serde_json::from_str(&json).ok()),
            None => Ok(None),
        }
    }

    /// Invalidate a session so the token can never resolve again.
    pub async fn destroy(&self, token: &str) -> AppResult<()> {
        let mut conn = self.connection().await?;
        let _: () = conn
            .del(store_key(token))
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete session: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tokens_are_unique_and_opaque() {
        let tokens: HashSet<_> = (0..100).map(|_| generate_token()).collect();
        assert_eq!(tokens.len(), 100);
        assert!(tokens.iter().all(|t| t.len() == 64));
    }

    #[test]
    fn store_key_is_a_digest_of_the_token() {
        let token = generate_token();
        let key = store_key(&token);
        assert!(key.starts_with("session:"));
        assert!(!key.contains(&token));
        assert_eq!(store_key(&token), key);
    }
}
