//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Own transaction scope: each service call is one `Store` operation.
//! - Keep transport/CLI layers decoupled from storage details.

pub mod audit_service;
pub mod auth_service;
pub mod word_service;
