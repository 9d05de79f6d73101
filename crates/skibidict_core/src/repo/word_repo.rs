//! Word aggregate repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the word/spelling/definition/tag aggregate.
//! - Keep SQL details inside the core persistence boundary.
//! - Define the repository error shared by all core repositories.
//!
//! # Invariants
//! - Write paths call `WordInput::validate()` before any SQL mutation.
//! - Every operation runs in one scoped transaction; readers never observe a
//!   partially written aggregate.
//! - Update is a full replace of the child subtree, never a merge.
//! - Not-found is a value (`None`/`false`), not an error.

use crate::db::{with_transaction, DbError};
use crate::model::user::UserValidationError;
use crate::model::word::{Definition, Word, WordId, WordInput, WordValidationError};
use crate::repo::readiness::{ensure_connection_ready, RequiredTable};
use rusqlite::{params, Connection, Params, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const WORD_TABLES: &[RequiredTable] = &[
    ("words", &["id"]),
    ("spellings", &["id", "word_id", "spelling"]),
    ("definitions", &["id", "word_id", "description"]),
    ("definition_tags", &["id", "definition_id", "tag"]),
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for core persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Word payload rejected before persistence.
    WordValidation(WordValidationError),
    /// User bootstrap input rejected before persistence.
    UserValidation(UserValidationError),
    /// A unique constraint rejected the write (duplicate user name/token).
    UniquenessViolation {
        table: &'static str,
        detail: String,
    },
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Connection schema is not at the expected version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Connection was opened without `PRAGMA foreign_keys = ON`.
    ForeignKeysDisabled,
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl RepoError {
    pub fn is_uniqueness_violation(&self) -> bool {
        matches!(self, Self::UniquenessViolation { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::WordValidation(_) | Self::UserValidation(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WordValidation(err) => write!(f, "{err}"),
            Self::UserValidation(err) => write!(f, "{err}"),
            Self::UniquenessViolation { table, detail } => {
                write!(f, "duplicate value in `{table}`: {detail}")
            }
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "repository requires column `{column}` in table `{table}`"
            ),
            Self::ForeignKeysDisabled => {
                write!(f, "repository requires `PRAGMA foreign_keys = ON`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::WordValidation(err) => Some(err),
            Self::UserValidation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<WordValidationError> for RepoError {
    fn from(value: WordValidationError) -> Self {
        Self::WordValidation(value)
    }
}

impl From<UserValidationError> for RepoError {
    fn from(value: UserValidationError) -> Self {
        Self::UserValidation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordListQuery {
    /// Substring filter over spellings. `None` or empty lists every word.
    ///
    /// Matched with SQLite `LIKE` after escaping wildcards, so the text is a
    /// literal substring and comparison is ASCII case-insensitive.
    pub text: Option<String>,
}

impl WordListQuery {
    pub fn matching(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// Repository interface for word aggregate operations.
pub trait WordRepository {
    /// Creates a word with its children and returns the materialized word.
    fn insert_word(&self, input: &WordInput) -> RepoResult<Word>;
    /// Loads one word, or `None` when the id does not exist.
    fn get_word(&self, id: WordId) -> RepoResult<Option<Word>>;
    /// Lists words ascending by id, optionally filtered by spelling substring.
    fn list_words(&self, query: &WordListQuery) -> RepoResult<Vec<Word>>;
    /// Replaces all children of an existing word; `None` when missing.
    fn update_word(&self, id: WordId, input: &WordInput) -> RepoResult<Option<Word>>;
    /// Deletes a word and, by cascade, all of its children.
    fn delete_word(&self, id: WordId) -> RepoResult<bool>;
}

/// SQLite-backed word repository.
pub struct SqliteWordRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteWordRepository<'conn> {
    /// Creates repository from a bootstrapped connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, WORD_TABLES)?;
        Ok(Self { conn })
    }
}

impl WordRepository for SqliteWordRepository<'_> {
    fn insert_word(&self, input: &WordInput) -> RepoResult<Word> {
        input.validate()?;

        with_transaction(self.conn, TransactionBehavior::Immediate, |tx| {
            tx.execute("INSERT INTO words DEFAULT VALUES;", [])?;
            let word_id = tx.last_insert_rowid();
            insert_children(tx, word_id, input)?;
            load_word(tx, word_id)?.ok_or_else(|| {
                RepoError::InvalidData(format!("word {word_id} missing after insert"))
            })
        })
    }

    fn get_word(&self, id: WordId) -> RepoResult<Option<Word>> {
        with_transaction(self.conn, TransactionBehavior::Deferred, |tx| {
            load_word(tx, id)
        })
    }

    fn list_words(&self, query: &WordListQuery) -> RepoResult<Vec<Word>> {
        let text = query.text.as_deref().filter(|value| !value.is_empty());

        with_transaction(self.conn, TransactionBehavior::Deferred, |tx| {
            let ids = match text {
                Some(value) => query_word_ids(
                    tx,
                    "SELECT DISTINCT word_id
                     FROM spellings
                     WHERE spelling LIKE ?1 ESCAPE '\\'
                     ORDER BY word_id ASC;",
                    [format!("%{}%", escape_like(value))],
                )?,
                None => query_word_ids(tx, "SELECT id FROM words ORDER BY id ASC;", [])?,
            };

            let mut words = Vec::with_capacity(ids.len());
            for id in ids {
                if let Some(word) = load_word(tx, id)? {
                    words.push(word);
                }
            }
            Ok(words)
        })
    }

    fn update_word(&self, id: WordId, input: &WordInput) -> RepoResult<Option<Word>> {
        input.validate()?;

        with_transaction(self.conn, TransactionBehavior::Immediate, |tx| {
            if !word_exists(tx, id)? {
                return Ok(None);
            }

            tx.execute("DELETE FROM spellings WHERE word_id = ?1;", [id])?;
            tx.execute(
                "DELETE FROM definition_tags
                 WHERE definition_id IN (
                    SELECT id FROM definitions WHERE word_id = ?1
                 );",
                [id],
            )?;
            tx.execute("DELETE FROM definitions WHERE word_id = ?1;", [id])?;

            insert_children(tx, id, input)?;
            load_word(tx, id)
        })
    }

    fn delete_word(&self, id: WordId) -> RepoResult<bool> {
        with_transaction(self.conn, TransactionBehavior::Immediate, |tx| {
            let changed = tx.execute("DELETE FROM words WHERE id = ?1;", [id])?;
            Ok(changed > 0)
        })
    }
}

fn insert_children(conn: &Connection, word_id: WordId, input: &WordInput) -> RepoResult<()> {
    let mut insert_spelling =
        conn.prepare_cached("INSERT INTO spellings (word_id, spelling) VALUES (?1, ?2);")?;
    for spelling in &input.spellings {
        insert_spelling.execute(params![word_id, spelling])?;
    }

    let mut insert_definition =
        conn.prepare_cached("INSERT INTO definitions (word_id, description) VALUES (?1, ?2);")?;
    let mut insert_tag =
        conn.prepare_cached("INSERT INTO definition_tags (definition_id, tag) VALUES (?1, ?2);")?;
    for definition in &input.definitions {
        insert_definition.execute(params![word_id, definition.description])?;
        let definition_id = conn.last_insert_rowid();
        for tag in &definition.tags {
            insert_tag.execute(params![definition_id, tag])?;
        }
    }

    Ok(())
}

fn load_word(conn: &Connection, id: WordId) -> RepoResult<Option<Word>> {
    if !word_exists(conn, id)? {
        return Ok(None);
    }

    let mut spelling_stmt =
        conn.prepare_cached("SELECT spelling FROM spellings WHERE word_id = ?1 ORDER BY id ASC;")?;
    let spellings = spelling_stmt
        .query_map([id], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut definition_stmt = conn.prepare_cached(
        "SELECT id, description FROM definitions WHERE word_id = ?1 ORDER BY id ASC;",
    )?;
    let rows = definition_stmt
        .query_map([id], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut tag_stmt = conn.prepare_cached(
        "SELECT tag FROM definition_tags WHERE definition_id = ?1 ORDER BY id ASC;",
    )?;
    let mut definitions = Vec::with_capacity(rows.len());
    for (definition_id, description) in rows {
        let tags = tag_stmt
            .query_map([definition_id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        definitions.push(Definition { description, tags });
    }

    Ok(Some(Word {
        id,
        spellings,
        definitions,
    }))
}

fn word_exists(conn: &Connection, id: WordId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM words WHERE id = ?1);",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn query_word_ids<P: Params>(conn: &Connection, sql: &str, params: P) -> RepoResult<Vec<WordId>> {
    let mut stmt = conn.prepare(sql)?;
    let ids = stmt
        .query_map(params, |row| row.get::<_, WordId>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ids)
}

/// Escapes `LIKE` wildcards so user text matches literally under `ESCAPE '\'`.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
