//! Audit log use-case service.

use crate::model::log_entry::{AuditAction, LogEntry, LogId};
use crate::model::user::UserId;
use crate::repo::audit_repo::{
    normalize_log_limit, AuditLogRepository, LogListQuery, SqliteAuditLogRepository,
};
use crate::repo::word_repo::RepoResult;
use crate::store::Store;

/// List result envelope used by service callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogListResult {
    /// Entries sorted by `id DESC`.
    pub items: Vec<LogEntry>,
    /// Effective normalized limit used by the query.
    pub applied_limit: u32,
}

#[derive(Clone)]
pub struct AuditService {
    store: Store,
}

impl AuditService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Appends one entry outside of a word mutation.
    ///
    /// Word mutations audit themselves through `WordService`; this entry
    /// point exists for other administrative actions.
    pub fn append_log(
        &self,
        user_id: UserId,
        action: AuditAction,
        detail: &str,
    ) -> RepoResult<LogId> {
        self.store.write(|conn| {
            SqliteAuditLogRepository::try_new(conn)?.append_log(user_id, action, detail)
        })
    }

    /// Lists entries newest first. `limit` defaults to 100 and clamps to 300.
    pub fn list_logs(&self, limit: Option<u32>, offset: u32) -> RepoResult<LogListResult> {
        let applied_limit = normalize_log_limit(limit);
        let query = LogListQuery {
            limit: Some(applied_limit),
            offset,
        };
        let items = self
            .store
            .read(|conn| SqliteAuditLogRepository::try_new(conn)?.list_logs(&query))?;
        Ok(LogListResult {
            items,
            applied_limit,
        })
    }
}
