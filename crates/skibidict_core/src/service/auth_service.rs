//! Token authentication and user bootstrap.
//!
//! # Invariants
//! - Tokens are opaque, long-lived, compared by exact match, never logged.
//! - Users are only created through `create_user`/`bootstrap_user`; the
//!   public API has no user-creation path.

use crate::model::user::User;
use crate::repo::user_repo::{SqliteUserRepository, UserRepository};
use crate::repo::word_repo::RepoResult;
use crate::store::Store;
use log::{debug, info, warn};

/// Bytes of randomness behind each generated token (hex doubles the length).
pub const TOKEN_BYTES: usize = 32;

/// Generates a fresh bearer token: 32 random bytes as lowercase hex.
pub fn generate_token() -> String {
    hex::encode(rand::random::<[u8; TOKEN_BYTES]>())
}

#[derive(Clone)]
pub struct AuthService {
    store: Store,
}

impl AuthService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Resolves a bearer token; empty and unknown tokens resolve to `None`.
    pub fn resolve_user(&self, token: &str) -> RepoResult<Option<User>> {
        let user = self
            .store
            .read(|conn| SqliteUserRepository::try_new(conn)?.find_user_by_token(token))?;
        match &user {
            Some(user) => debug!(
                "event=auth_resolve module=service status=ok user_id={}",
                user.id
            ),
            None => debug!("event=auth_resolve module=service status=rejected"),
        }
        Ok(user)
    }

    /// Creates a user with a caller-supplied token.
    ///
    /// # Errors
    /// - `RepoError::UserValidation` for malformed names or tokens.
    /// - `RepoError::UniquenessViolation` when the name or token exists.
    pub fn create_user(&self, name: &str, token: &str) -> RepoResult<User> {
        let result = self
            .store
            .write(|conn| SqliteUserRepository::try_new(conn)?.create_user(name, token));
        match &result {
            Ok(user) => info!(
                "event=user_create module=service status=ok user_id={} name={}",
                user.id, user.name
            ),
            Err(err) => warn!(
                "event=user_create module=service status=error name={} error={}",
                name, err
            ),
        }
        result
    }

    /// Creates a user with a freshly generated token.
    ///
    /// The returned `User::token` is the only place the secret is available.
    pub fn bootstrap_user(&self, name: &str) -> RepoResult<User> {
        self.create_user(name, &generate_token())
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_token, TOKEN_BYTES};

    #[test]
    fn generated_tokens_are_hex_and_distinct() {
        let first = generate_token();
        let second = generate_token();

        assert_eq!(first.len(), TOKEN_BYTES * 2);
        assert!(first
            .chars()
            .all(|ch| ch.is_ascii_digit() || ('a'..='f').contains(&ch)));
        assert_eq!(hex::decode(&first).unwrap().len(), TOKEN_BYTES);
        assert_ne!(first, second);
    }
}
