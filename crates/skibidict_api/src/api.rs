//! HTTP handlers for words, audit logs and health.
//!
//! # Responsibility
//! - Translate requests into core service calls and results into JSON.
//! - Keep blocking SQLite work off the async runtime.
//!
//! # Invariants
//! - Mutations are attributed to the authenticated caller.
//! - Not-found is reported as 404 with `{"detail": "Word not found"}`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use skibidict_core::{core_version, LogEntry, RepoResult, Word, WordId, WordInput};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Query string of `GET /words`.
#[derive(Debug, Default, Deserialize)]
pub struct WordsQuery {
    pub q: Option<String>,
}

/// Query string of `GET /logs`.
#[derive(Debug, Default, Deserialize)]
pub struct LogsQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Runs a store operation on the blocking pool.
pub(crate) async fn run_blocking<T, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> RepoResult<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(f).await?;
    Ok(result?)
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": core_version(),
    }))
}

pub async fn list_words(
    State(state): State<AppState>,
    _user: AuthUser,
    query: Result<Query<WordsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Word>>> {
    let Query(query) = query.map_err(|err| ApiError::InvalidInput(err.body_text()))?;
    let words = state.words.clone();
    let listed = run_blocking(move || words.list_words(query.q.as_deref())).await?;
    Ok(Json(listed))
}

pub async fn create_word(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<WordInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Word>)> {
    let Json(input) = payload.map_err(|err| ApiError::InvalidInput(err.body_text()))?;
    input.validate()?;
    let words = state.words.clone();
    let created = run_blocking(move || words.create_word(user.id, &input)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_word(
    State(state): State<AppState>,
    _user: AuthUser,
    id: Result<Path<WordId>, PathRejection>,
) -> ApiResult<Json<Word>> {
    let Path(id) = id.map_err(|err| ApiError::InvalidInput(err.body_text()))?;
    let words = state.words.clone();
    run_blocking(move || words.get_word(id))
        .await?
        .map(Json)
        .ok_or_else(ApiError::word_not_found)
}

pub async fn update_word(
    State(state): State<AppState>,
    user: AuthUser,
    id: Result<Path<WordId>, PathRejection>,
    payload: Result<Json<WordInput>, JsonRejection>,
) -> ApiResult<Json<Word>> {
    let Path(id) = id.map_err(|err| ApiError::InvalidInput(err.body_text()))?;
    let Json(input) = payload.map_err(|err| ApiError::InvalidInput(err.body_text()))?;
    input.validate()?;
    let words = state.words.clone();
    run_blocking(move || words.update_word(user.id, id, &input))
        .await?
        .map(Json)
        .ok_or_else(ApiError::word_not_found)
}

pub async fn delete_word(
    State(state): State<AppState>,
    user: AuthUser,
    id: Result<Path<WordId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id.map_err(|err| ApiError::InvalidInput(err.body_text()))?;
    let words = state.words.clone();
    if run_blocking(move || words.delete_word(user.id, id)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::word_not_found())
    }
}

pub async fn list_logs(
    State(state): State<AppState>,
    _user: AuthUser,
    query: Result<Query<LogsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<LogEntry>>> {
    let Query(query) = query.map_err(|err| ApiError::InvalidInput(err.body_text()))?;
    let audit = state.audit.clone();
    let listed = run_blocking(move || audit.list_logs(query.limit, query.offset.unwrap_or(0)))
        .await?;
    Ok(Json(listed.items))
}
