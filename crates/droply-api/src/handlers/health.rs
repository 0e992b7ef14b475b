//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
///
/// Answers 503 when either store is unreachable.
pub async fn health(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let (db, blobs) = tokio::join!(
        state.entry_store.health_check(),
        state.blob_store.health_check()
    );
    let db_ok = matches!(db, Ok(true));
    let blobs_ok = matches!(blobs, Ok(true));

    let status = if db_ok && blobs_ok {
        StatusCode::OK
    } else {
        tracing::warn!(database = db_ok, blob_store = blobs_ok, "Health check degraded");
        StatusCode::SERVICE_UNAVAILABLE
    };

    let describe = |ok: bool| if ok { "connected" } else { "unavailable" };
    (
        status,
        Json(ApiResponse::ok(HealthResponse {
            status: if status.is_success() { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: describe(db_ok).to_string(),
            blob_store: format!("{} ({})", describe(blobs_ok), state.blob_store.provider_type()),
        })),
    )
}
