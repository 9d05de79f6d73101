//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repositories are constructed over a borrowed, bootstrapped connection
//!   and verify its readiness before use.
//! - Multi-statement operations run inside `db::with_transaction`, so they
//!   also compose into a caller's enclosing transaction.
//! - Not-found is reported as a value; `RepoError` is reserved for faults.

pub mod audit_repo;
mod readiness;
pub mod user_repo;
pub mod word_repo;
