//! Domain model for the dictionary store.
//!
//! # Responsibility
//! - Define the Word aggregate (spellings, definitions, tags) as one typed
//!   structure, plus the User and audit LogEntry records.
//! - Validate inbound aggregate payloads before they reach persistence.
//!
//! # Invariants
//! - A Word is the consistency unit: its children are only ever written or
//!   replaced together with it.
//! - Child ordering is creation order; there is no explicit sort key.

pub mod log_entry;
pub mod user;
pub mod word;
