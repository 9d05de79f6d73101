//! HTTP transport for the Skibidict dictionary.
//!
//! Thin layer over `skibidict_core`: bearer authentication, JSON mapping and
//! request logging. All persistence rules live in core.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod router;
pub mod state;

pub use auth::AuthUser;
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use state::AppState;
