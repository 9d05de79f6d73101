//! Dictionary storage: connection opening and the scoped transaction.
//!
//! Every connection handed out here already has the dictionary tables and
//! `foreign_keys=ON`.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
mod transaction;

pub use open::{open_db, open_db_in_memory, SCHEMA_VERSION};
pub use transaction::with_transaction;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
