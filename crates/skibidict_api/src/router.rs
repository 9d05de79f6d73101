//! Route table and request logging.

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use log::info;
use std::time::Instant;
use uuid::Uuid;

use crate::api::{create_word, delete_word, get_word, health, list_logs, list_words, update_word};
use crate::auth::require_auth;
use crate::state::AppState;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Builds the full application router.
///
/// `/health` is public; every other route sits behind `require_auth`.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/words", get(list_words).post(create_word))
        .route(
            "/words/{id}",
            get(get_word).put(update_word).delete(delete_word),
        )
        .route("/logs", get(list_logs))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health))
        .merge(protected)
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Tags each request with a fresh id and logs its outcome.
async fn log_requests(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    info!(
        "event=http_request module=api status={} method={} path={} duration_ms={} request_id={}",
        response.status().as_u16(),
        method,
        path,
        started_at.elapsed().as_millis(),
        request_id
    );
    response
}
