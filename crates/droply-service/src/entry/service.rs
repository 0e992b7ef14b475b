//! Entry browsing and flag toggles.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use droply_core::error::AppError;
use droply_database::repositories::EntryStore;
use droply_entity::{Entry, EntryPatch};

use crate::context::RequestContext;

/// Reads and metadata-only mutations of entries. Never touches blob content.
#[derive(Debug, Clone)]
pub struct EntryService {
    entries: Arc<dyn EntryStore>,
}

impl EntryService {
    /// Creates a new entry service.
    pub fn new(entries: Arc<dyn EntryStore>) -> Self {
        Self { entries }
    }

    /// Immediate children of `parent_id`, or the caller's root set. Trashed
    /// entries are included; filtering them is up to the client.
    pub async fn list_children(
        &self,
        ctx: &RequestContext,
        parent_id: Option<Uuid>,
    ) -> Result<Vec<Entry>, AppError> {
        self.entries.list_children(&ctx.owner, parent_id).await
    }

    /// Fetch one entry.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Entry, AppError> {
        self.entries
            .get(id, &ctx.owner)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Change an entry's display name.
    pub async fn rename(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        name: &str,
    ) -> Result<Entry, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Name must not be empty"));
        }
        let entry = self
            .entries
            .update(id, &ctx.owner, EntryPatch::rename(name))
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;
        info!(owner_id = %ctx.owner, entry_id = %id, "Entry renamed");
        Ok(entry)
    }

    /// Flip the star flag.
    pub async fn toggle_star(&self, ctx: &RequestContext, id: Uuid) -> Result<Entry, AppError> {
        let current = self.get(ctx, id).await?;
        self.entries
            .update(id, &ctx.owner, EntryPatch::starred(!current.is_starred))
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Flip the trash flag. Children and blob content are untouched.
    ///
    /// The write is conditional on the flag still holding the value read
    /// here. If another request flipped it in between, the call fails with
    /// a conflict rather than silently undoing that request.
    pub async fn toggle_trash(&self, ctx: &RequestContext, id: Uuid) -> Result<Entry, AppError> {
        let current = self.get(ctx, id).await?;

        match self
            .entries
            .update(id, &ctx.owner, EntryPatch::toggle_trash(current.is_trashed))
            .await?
        {
            Some(entry) => {
                info!(
                    owner_id = %ctx.owner,
                    entry_id = %id,
                    state = entry.trash_verb(),
                    "Trash flag toggled"
                );
                Ok(entry)
            }
            None => match self.entries.get(id, &ctx.owner).await? {
                None => Err(AppError::not_found("File not found")),
                Some(_) => {
                    warn!(owner_id = %ctx.owner, entry_id = %id, "Concurrent trash toggle");
                    Err(AppError::conflict(
                        "File was modified concurrently, retry the request",
                    ))
                }
            },
        }
    }
}
