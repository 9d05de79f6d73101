//! Core domain logic for the Skibidict dictionary service.
//! This crate is the single source of truth for persistence and audit
//! invariants; transports only translate to and from it.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::Config;
pub use db::{DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::log_entry::{AuditAction, LogEntry, LogId};
pub use model::user::{User, UserId, UserValidationError};
pub use model::word::{Definition, Word, WordId, WordInput, WordValidationError};
pub use repo::audit_repo::{
    AuditLogRepository, LogListQuery, SqliteAuditLogRepository, LOG_DEFAULT_LIMIT, LOG_LIMIT_MAX,
};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::word_repo::{
    RepoError, RepoResult, SqliteWordRepository, WordListQuery, WordRepository,
};
pub use service::audit_service::{AuditService, LogListResult};
pub use service::auth_service::{generate_token, AuthService};
pub use service::word_service::WordService;
pub use store::Store;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
