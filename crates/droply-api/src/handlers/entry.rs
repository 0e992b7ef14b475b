//! Entry listing, upload, and flag handlers.

use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use bytes::Bytes;
use validator::Validate;

use droply_core::error::AppError;
use droply_entity::Entry;
use droply_service::UploadRequest;
use droply_service::entry::parent::parse_parent_id;

use crate::dto::request::{ListEntriesQuery, RenameRequest};
use crate::dto::response::{ApiResponse, EntryMessage};
use crate::error::ApiError;
use crate::extractors::{AuthUser, EntryId};
use crate::state::AppState;

/// GET /api/entries?userId=...&parentId=...
pub async fn list_entries(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListEntriesQuery>,
) -> Result<Json<ApiResponse<Vec<Entry>>>, ApiError> {
    auth.ensure_claimed(query.user_id.as_deref())?;
    let parent_id = parse_parent_id(query.parent_id.as_deref())?;

    let entries = state
        .entry_service
        .list_children(auth.context(), parent_id)
        .await?;
    Ok(Json(ApiResponse::ok(entries)))
}

/// POST /api/entries (multipart: `file`, `userId`, `parentId`)
pub async fn upload_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<EntryMessage>>), ApiError> {
    let mut claimed: Option<String> = None;
    let mut parent: Option<String> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "userId" => claimed = Some(field.text().await?),
            "parentId" => parent = Some(field.text().await?),
            "file" => {
                file_name = field.file_name().map(String::from);
                content_type = field.content_type().map(String::from);
                data = Some(field.bytes().await?);
            }
            _ => {}
        }
    }

    auth.ensure_claimed(claimed.as_deref())?;
    let data = data.ok_or_else(|| AppError::validation("File is required"))?;
    let parent_id = parse_parent_id(parent.as_deref())?;

    let entry = state
        .upload_service
        .upload(
            auth.context(),
            UploadRequest {
                parent_id,
                file_name: file_name.unwrap_or_default(),
                content_type: content_type.unwrap_or_default(),
                data,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(EntryMessage::new(
            entry,
            "File uploaded successfully",
        ))),
    ))
}

/// PATCH /api/entries/{id}
pub async fn rename_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    EntryId(id): EntryId,
    Json(req): Json<RenameRequest>,
) -> Result<Json<ApiResponse<Entry>>, ApiError> {
    req.validate()?;
    let entry = state
        .entry_service
        .rename(auth.context(), id, &req.name)
        .await?;
    Ok(Json(ApiResponse::ok(entry)))
}

/// PATCH /api/entries/{id}/star
pub async fn toggle_star(
    State(state): State<AppState>,
    auth: AuthUser,
    EntryId(id): EntryId,
) -> Result<Json<ApiResponse<Entry>>, ApiError> {
    let entry = state.entry_service.toggle_star(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(entry)))
}

/// PATCH /api/entries/{id}/trash
pub async fn toggle_trash(
    State(state): State<AppState>,
    auth: AuthUser,
    EntryId(id): EntryId,
) -> Result<Json<ApiResponse<EntryMessage>>, ApiError> {
    let entry = state.entry_service.toggle_trash(auth.context(), id).await?;
    let message = format!("File successfully {}", entry.trash_verb());
    Ok(Json(ApiResponse::ok(EntryMessage::new(entry, message))))
}
