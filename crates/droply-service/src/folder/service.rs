//! Folder service.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use droply_core::error::AppError;
use droply_database::repositories::EntryStore;
use droply_entity::{CreateEntry, Entry};

use crate::context::RequestContext;
use crate::entry::parent::resolve_parent;

/// Creates folders. Folders never touch the blob store.
#[derive(Debug, Clone)]
pub struct FolderService {
    entries: Arc<dyn EntryStore>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(entries: Arc<dyn EntryStore>) -> Self {
        Self { entries }
    }

    /// Create a folder under `parent_id`, or at root.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> Result<Entry, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name must not be empty"));
        }
        if name.contains('/') {
            return Err(AppError::validation("Folder name must not contain '/'"));
        }
        if let Some(parent_id) = parent_id {
            resolve_parent(self.entries.as_ref(), ctx, parent_id).await?;
        }

        let folder = self
            .entries
            .create(CreateEntry::folder(&ctx.owner, parent_id, name))
            .await?;
        info!(owner_id = %ctx.owner, entry_id = %folder.id, "Folder created");
        Ok(folder)
    }
}
