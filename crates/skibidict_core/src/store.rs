//! Shared store handle.
//!
//! # Responsibility
//! - Own the single persistent SQLite connection for a process.
//! - Hand the connection to callers one logical operation at a time, inside
//!   a scoped transaction.
//!
//! # Invariants
//! - `Store` is constructed explicitly and injected; there is no global.
//! - Clones share one connection. Operations from concurrent callers are
//!   serialized by the mutex; SQLite serializes writers across processes.
//! - A poisoned mutex is recovered: the panicking operation's transaction
//!   was rolled back when its guard dropped.

use crate::db::{open_db, open_db_in_memory, with_transaction, DbResult};
use rusqlite::{Connection, TransactionBehavior};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Opens (or creates) a file-backed store with the schema applied.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens a private in-memory store, mainly for tests.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already bootstrapped connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs a read-only operation against one consistent snapshot.
    pub fn read<T, E, F>(&self, f: F) -> Result<T, E>
    where
        E: From<rusqlite::Error>,
        F: FnOnce(&Connection) -> Result<T, E>,
    {
        let conn = self.lock();
        with_transaction(&conn, TransactionBehavior::Deferred, f)
    }

    /// Runs a mutating operation; commits on `Ok`, rolls back otherwise.
    pub fn write<T, E, F>(&self, f: F) -> Result<T, E>
    where
        E: From<rusqlite::Error>,
        F: FnOnce(&Connection) -> Result<T, E>,
    {
        let conn = self.lock();
        with_transaction(&conn, TransactionBehavior::Immediate, f)
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
