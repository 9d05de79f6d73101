//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by core behavior.
//! - Apply the schema before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - File-backed connections run in WAL journal mode so readers are not
//!   blocked by a writer's open transaction.
//! - Returned connections have every table and index; schema creation is
//!   create-if-missing only and never alters existing objects.

use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Value stamped into `PRAGMA user_version` once the tables exist.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Opens a SQLite database file and applies the schema.
///
/// The file is created when missing.
///
/// # Side effects
/// - Switches the database to WAL journal mode (persistent in the file).
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    let mut conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_open(&mut conn, "file", started_at)?;
    Ok(conn)
}

/// Opens an in-memory SQLite database and applies the schema.
///
/// In-memory databases report journal mode `memory`; WAL is not available.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let mut conn = match Connection::open_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=memory duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_open(&mut conn, "memory", started_at)?;
    Ok(conn)
}

fn finish_open(conn: &mut Connection, mode: &str, started_at: Instant) -> DbResult<()> {
    match bootstrap_connection(conn) {
        Ok(journal_mode) => {
            info!(
                "event=db_open module=db status=ok mode={} journal_mode={} duration_ms={}",
                mode,
                journal_mode,
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<String> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    let journal_mode: String =
        conn.query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    ensure_schema(conn)?;
    Ok(journal_mode)
}

/// Creates whatever tables and indexes are missing. Existing rows and
/// objects are left alone.
fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let stamped: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if stamped == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;
    Ok(())
}
