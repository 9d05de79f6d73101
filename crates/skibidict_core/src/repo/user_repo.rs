//! User repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `name` and `token` are each globally unique; duplicates surface as
//!   `RepoError::UniquenessViolation` and leave no row behind.
//! - Token lookup is exact-match; an empty token never matches.

use crate::model::user::{validate_new_user, User};
use crate::repo::readiness::{ensure_connection_ready, RequiredTable};
use crate::repo::word_repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const USER_TABLES: &[RequiredTable] = &[("users", &["id", "name", "token"])];

/// Repository interface for API users.
pub trait UserRepository {
    /// Inserts a user; fails on duplicate name or token.
    fn create_user(&self, name: &str, token: &str) -> RepoResult<User>;
    /// Resolves a bearer token to its user.
    fn find_user_by_token(&self, token: &str) -> RepoResult<Option<User>>;
    fn find_user_by_name(&self, name: &str) -> RepoResult<Option<User>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, USER_TABLES)?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, name: &str, token: &str) -> RepoResult<User> {
        validate_new_user(name, token)?;

        self.conn
            .execute(
                "INSERT INTO users (name, token) VALUES (?1, ?2);",
                params![name, token],
            )
            .map_err(|err| classify_unique_violation(err, "users"))?;

        Ok(User {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            token: token.to_string(),
        })
    }

    fn find_user_by_token(&self, token: &str) -> RepoResult<Option<User>> {
        if token.is_empty() {
            return Ok(None);
        }

        let user = self
            .conn
            .query_row(
                "SELECT id, name, token FROM users WHERE token = ?1;",
                [token],
                parse_user_row,
            )
            .optional()?;
        Ok(user)
    }

    fn find_user_by_name(&self, name: &str) -> RepoResult<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, name, token FROM users WHERE name = ?1;",
                [name],
                parse_user_row,
            )
            .optional()?;
        Ok(user)
    }
}

fn parse_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
        token: row.get("token")?,
    })
}

/// Maps SQLite unique-constraint failures to `UniquenessViolation`.
fn classify_unique_violation(err: rusqlite::Error, table: &'static str) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, message) = &err {
        if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
            let detail = message
                .clone()
                .unwrap_or_else(|| failure.to_string());
            return RepoError::UniquenessViolation { table, detail };
        }
    }
    err.into()
}
