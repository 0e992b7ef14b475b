//! Route definitions for the Droply HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::http::StatusCode;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Multipart framing on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.storage.max_upload_size_bytes as usize + MULTIPART_OVERHEAD_BYTES;
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    let api_routes = Router::new()
        .merge(entry_routes())
        .merge(folder_routes())
        .merge(auth_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&state.config.server.cors))
        .layer(axum_middleware::from_fn(request_logging))
        .with_state(state)
}

/// Entries: listing, upload, flags, hard-delete, trash
fn entry_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/entries",
            get(handlers::entry::list_entries).post(handlers::entry::upload_entry),
        )
        .route(
            "/entries/trash",
            get(handlers::trash::list_trash).delete(handlers::trash::empty_trash),
        )
        .route(
            "/entries/{id}",
            patch(handlers::entry::rename_entry).delete(handlers::trash::delete_entry),
        )
        .route("/entries/{id}/trash", patch(handlers::entry::toggle_trash))
        .route("/entries/{id}/star", patch(handlers::entry::toggle_star))
}

/// Folders
fn folder_routes() -> Router<AppState> {
    Router::new().route("/folders", post(handlers::folder::create_folder))
}

/// Direct-upload credentials
fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/blob-token", get(handlers::auth::blob_token))
}

/// Health check (no auth)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
