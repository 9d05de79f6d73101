//! Audit log repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Append one log row per successful word mutation.
//! - Read the log newest-first with limit/offset paging.
//!
//! # Invariants
//! - Append-only: this module exposes no update or delete path.
//! - `user_id` must reference an existing user (foreign key).
//! - List limit defaults to 100 and is silently clamped to 300.

use crate::model::log_entry::{AuditAction, LogEntry, LogId};
use crate::model::user::UserId;
use crate::repo::readiness::{ensure_connection_ready, RequiredTable};
use crate::repo::word_repo::RepoResult;
use rusqlite::{params, Connection, Row};

pub const LOG_DEFAULT_LIMIT: u32 = 100;
pub const LOG_LIMIT_MAX: u32 = 300;

const AUDIT_TABLES: &[RequiredTable] = &[
    ("users", &["id", "name"]),
    (
        "logs",
        &["id", "user_id", "action", "detail", "timestamp"],
    ),
];

/// Paging options for the audit log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogListQuery {
    /// Maximum rows to return. Defaults to 100 and clamps to 300.
    pub limit: Option<u32>,
    /// Number of newest rows to skip.
    pub offset: u32,
}

/// Normalizes list limit according to the audit log contract.
pub fn normalize_log_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(LOG_DEFAULT_LIMIT).min(LOG_LIMIT_MAX)
}

/// Repository interface for audit log operations.
pub trait AuditLogRepository {
    /// Appends one entry; the store assigns `id` and `timestamp`.
    fn append_log(&self, user_id: UserId, action: AuditAction, detail: &str) -> RepoResult<LogId>;
    /// Lists entries newest first, joined with the acting user's name.
    fn list_logs(&self, query: &LogListQuery) -> RepoResult<Vec<LogEntry>>;
}

/// SQLite-backed audit log repository.
pub struct SqliteAuditLogRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuditLogRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, AUDIT_TABLES)?;
        Ok(Self { conn })
    }
}

impl AuditLogRepository for SqliteAuditLogRepository<'_> {
    fn append_log(&self, user_id: UserId, action: AuditAction, detail: &str) -> RepoResult<LogId> {
        self.conn.execute(
            "INSERT INTO logs (user_id, action, detail) VALUES (?1, ?2, ?3);",
            params![user_id, action.as_str(), detail],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_logs(&self, query: &LogListQuery) -> RepoResult<Vec<LogEntry>> {
        let limit = normalize_log_limit(query.limit);
        let mut stmt = self.conn.prepare(
            "SELECT
                l.id,
                l.user_id,
                u.name AS user,
                l.action,
                l.detail,
                l.timestamp
             FROM logs l
             INNER JOIN users u ON u.id = l.user_id
             ORDER BY l.id DESC
             LIMIT ?1 OFFSET ?2;",
        )?;

        let entries = stmt
            .query_map(
                params![i64::from(limit), i64::from(query.offset)],
                parse_log_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}

fn parse_log_row(row: &Row<'_>) -> rusqlite::Result<LogEntry> {
    Ok(LogEntry {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        user: row.get("user")?,
        action: row.get("action")?,
        detail: row.get("detail")?,
        timestamp: row.get("timestamp")?,
    })
}
