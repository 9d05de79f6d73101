//! Audit log model.
//!
//! # Invariants
//! - Entries are append-only; no update or delete path exists.
//! - `timestamp` is assigned by the store at insertion (UTC, millisecond
//!   precision, `YYYY-MM-DDTHH:MM:SS.sssZ`).

use super::user::UserId;
use serde::Serialize;

pub type LogId = i64;

/// Kind label of an audited mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    CreateWord,
    UpdateWord,
    DeleteWord,
}

impl AuditAction {
    /// Stable label persisted in `logs.action`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateWord => "create_word",
            Self::UpdateWord => "update_word",
            Self::DeleteWord => "delete_word",
        }
    }
}

/// One audit record joined with the acting user's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub id: LogId,
    pub user_id: UserId,
    /// Name of the acting user.
    pub user: String,
    pub action: String,
    pub detail: String,
    pub timestamp: String,
}
