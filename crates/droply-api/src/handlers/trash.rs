//! Hard-delete and trash handlers.

use axum::Json;
use axum::extract::State;

use droply_entity::Entry;
use droply_service::PurgeReport;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, EntryId};
use crate::state::AppState;

/// GET /api/entries/trash
pub async fn list_trash(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Entry>>>, ApiError> {
    let entries = state.trash_service.list_trashed(auth.context()).await?;
    Ok(Json(ApiResponse::ok(entries)))
}

/// DELETE /api/entries/{id}
pub async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    EntryId(id): EntryId,
) -> Result<Json<ApiResponse<Entry>>, ApiError> {
    let entry = state
        .trash_service
        .delete_permanently(auth.context(), id)
        .await?;
    Ok(Json(ApiResponse::ok(entry)))
}

/// DELETE /api/entries/trash
pub async fn empty_trash(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<PurgeReport>>, ApiError> {
    let report = state.trash_service.empty_trash(auth.context()).await?;
    Ok(Json(ApiResponse::ok(report)))
}
