//! API user model.
//!
//! Users are created by the administrative bootstrap only. The token is an
//! opaque long-lived secret and is never serialized.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type UserId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(skip_serializing)]
    pub token: String,
}

/// Validation failures for user bootstrap input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    PaddedName(String),
    EmptyToken,
    PaddedToken,
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "user name must not be empty"),
            Self::PaddedName(name) => {
                write!(f, "user name `{name}` must not have surrounding whitespace")
            }
            Self::EmptyToken => write!(f, "token must not be empty"),
            Self::PaddedToken => write!(f, "token must not have surrounding whitespace"),
        }
    }
}

impl Error for UserValidationError {}

/// Checks a user name/token pair before it is persisted.
///
/// Names and tokens follow the same rule: non-empty, no surrounding
/// whitespace. Anything else, including inner spaces, is stored as given.
pub fn validate_new_user(name: &str, token: &str) -> Result<(), UserValidationError> {
    if name.is_empty() {
        return Err(UserValidationError::EmptyName);
    }
    if name.trim() != name {
        return Err(UserValidationError::PaddedName(name.to_string()));
    }
    if token.is_empty() {
        return Err(UserValidationError::EmptyToken);
    }
    if token.trim() != token {
        return Err(UserValidationError::PaddedToken);
    }
    Ok(())
}
