//! Parent folder resolution shared by uploads and folder creation.

use uuid::Uuid;

use droply_core::error::AppError;
use droply_database::repositories::EntryStore;
use droply_entity::Entry;

use crate::context::RequestContext;

/// Parse a client-supplied parent id. Blank means root.
pub fn parse_parent_id(raw: Option<&str>) -> Result<Option<Uuid>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => Uuid::parse_str(s)
            .map(Some)
            .map_err(|_| AppError::validation(format!("Invalid parent id '{s}'"))),
    }
}

/// Load `parent_id` and check it can receive children: it must exist for
/// the caller, be a folder, and not be trashed.
pub async fn resolve_parent(
    entries: &dyn EntryStore,
    ctx: &RequestContext,
    parent_id: Uuid,
) -> Result<Entry, AppError> {
    let parent = entries
        .get(parent_id, &ctx.owner)
        .await?
        .ok_or_else(|| AppError::validation("Parent folder not found"))?;

    if !parent.is_folder {
        return Err(AppError::validation("Parent is not a folder"));
    }
    if parent.is_trashed {
        return Err(AppError::validation("Parent folder is in trash"));
    }
    Ok(parent)
}
