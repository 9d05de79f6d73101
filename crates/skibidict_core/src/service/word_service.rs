//! Word use-case service.
//!
//! # Responsibility
//! - Provide the word CRUD entry points used by transport and CLI layers.
//! - Record exactly one audit entry per successful mutation.
//!
//! # Invariants
//! - A mutation and its audit entry commit in the same transaction; if the
//!   append fails the mutation is rolled back.
//! - Reads and not-found outcomes never write audit entries.

use crate::model::log_entry::AuditAction;
use crate::model::user::UserId;
use crate::model::word::{Word, WordId, WordInput};
use crate::repo::audit_repo::{AuditLogRepository, SqliteAuditLogRepository};
use crate::repo::word_repo::{
    RepoError, RepoResult, SqliteWordRepository, WordListQuery, WordRepository,
};
use crate::store::Store;
use log::{info, warn};
use rusqlite::Connection;

/// Use-case service over the shared store.
#[derive(Clone)]
pub struct WordService {
    store: Store,
}

impl WordService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Lists all words, or those with a spelling containing `query`.
    pub fn list_words(&self, query: Option<&str>) -> RepoResult<Vec<Word>> {
        let query = WordListQuery {
            text: query.map(str::to_string),
        };
        self.store
            .read(|conn| SqliteWordRepository::try_new(conn)?.list_words(&query))
    }

    pub fn get_word(&self, id: WordId) -> RepoResult<Option<Word>> {
        self.store
            .read(|conn| SqliteWordRepository::try_new(conn)?.get_word(id))
    }

    /// Creates a word on behalf of `actor` and audits it as `create_word`.
    pub fn create_word(&self, actor: UserId, input: &WordInput) -> RepoResult<Word> {
        let result = self.store.write(|conn| {
            let word = SqliteWordRepository::try_new(conn)?.insert_word(input)?;
            audit(conn, actor, AuditAction::CreateWord, word.id)?;
            Ok(word)
        });

        match &result {
            Ok(word) => info!(
                "event=word_create module=service status=ok word_id={} user_id={}",
                word.id, actor
            ),
            Err(err) => log_failure("word_create", actor, None, err),
        }
        result
    }

    /// Replaces every child of word `id`. Returns `None` when it does not exist.
    pub fn update_word(
        &self,
        actor: UserId,
        id: WordId,
        input: &WordInput,
    ) -> RepoResult<Option<Word>> {
        let result = self.store.write(|conn| {
            let updated = SqliteWordRepository::try_new(conn)?.update_word(id, input)?;
            if updated.is_some() {
                audit(conn, actor, AuditAction::UpdateWord, id)?;
            }
            Ok(updated)
        });

        match &result {
            Ok(Some(_)) => info!(
                "event=word_update module=service status=ok word_id={} user_id={}",
                id, actor
            ),
            Ok(None) => info!(
                "event=word_update module=service status=not_found word_id={} user_id={}",
                id, actor
            ),
            Err(err) => log_failure("word_update", actor, Some(id), err),
        }
        result
    }

    /// Deletes word `id` and its children. Returns `false` when it does not exist.
    pub fn delete_word(&self, actor: UserId, id: WordId) -> RepoResult<bool> {
        let result = self.store.write(|conn| {
            let deleted = SqliteWordRepository::try_new(conn)?.delete_word(id)?;
            if deleted {
                audit(conn, actor, AuditAction::DeleteWord, id)?;
            }
            Ok(deleted)
        });

        match &result {
            Ok(true) => info!(
                "event=word_delete module=service status=ok word_id={} user_id={}",
                id, actor
            ),
            Ok(false) => info!(
                "event=word_delete module=service status=not_found word_id={} user_id={}",
                id, actor
            ),
            Err(err) => log_failure("word_delete", actor, Some(id), err),
        }
        result
    }
}

fn audit(
    conn: &Connection,
    actor: UserId,
    action: AuditAction,
    word_id: WordId,
) -> RepoResult<()> {
    let detail = format!("id={word_id}");
    SqliteAuditLogRepository::try_new(conn)?.append_log(actor, action, &detail)?;
    Ok(())
}

fn log_failure(event: &str, actor: UserId, word_id: Option<WordId>, err: &RepoError) {
    let word_id = word_id.map_or_else(|| "-".to_string(), |id| id.to_string());
    let status = if err.is_validation() {
        "rejected"
    } else {
        "error"
    };
    warn!(
        "event={} module=service status={} word_id={} user_id={} error={}",
        event, status, word_id, actor, err
    );
}
