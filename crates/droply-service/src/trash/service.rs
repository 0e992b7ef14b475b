//! Hard delete and trash purge.
//!
//! Both paths clean the blob first and remove the row second, so a row is
//! never lost while its content is still referenced elsewhere. They differ
//! in how blob failures are treated: a single delete aborts and keeps the
//! row, a purge logs the failure and removes every trashed row anyway.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use droply_core::error::{AppError, ErrorKind};
use droply_core::traits::BlobStore;
use droply_database::repositories::EntryStore;
use droply_entity::Entry;
use droply_storage::{key_from_path, remove_blob, resolve_key};

use crate::context::RequestContext;

/// Outcome of emptying the trash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeReport {
    /// Trashed entries found before cleanup.
    pub trashed: usize,
    /// Blob deletions that failed and were skipped.
    pub blob_failures: usize,
    /// Rows removed by the bulk delete.
    pub deleted: usize,
    /// Summary for display.
    pub message: String,
}

impl PurgeReport {
    fn empty() -> Self {
        Self {
            trashed: 0,
            blob_failures: 0,
            deleted: 0,
            message: "No files in trash".to_string(),
        }
    }

    fn finished(trashed: usize, blob_failures: usize, deleted: usize) -> Self {
        let message = if deleted == 0 {
            "No files deleted".to_string()
        } else {
            format!("{deleted} Files deleted successfully")
        };
        Self {
            trashed,
            blob_failures,
            deleted,
            message,
        }
    }
}

/// Permanent removal of entries and their content.
#[derive(Debug, Clone)]
pub struct TrashService {
    entries: Arc<dyn EntryStore>,
    blobs: Arc<dyn BlobStore>,
    purge_concurrency: usize,
}

impl TrashService {
    /// Creates a new trash service.
    pub fn new(
        entries: Arc<dyn EntryStore>,
        blobs: Arc<dyn BlobStore>,
        purge_concurrency: usize,
    ) -> Self {
        Self {
            entries,
            blobs,
            purge_concurrency: purge_concurrency.max(1),
        }
    }

    /// The caller's trashed entries.
    pub async fn list_trashed(&self, ctx: &RequestContext) -> Result<Vec<Entry>, AppError> {
        self.entries.list_trashed(&ctx.owner).await
    }

    /// Permanently delete one entry regardless of its trash state.
    ///
    /// For files the blob key comes from the content URL. If no key can be
    /// derived, or the blob store fails, the row is kept and the error is
    /// returned. Folders are removed without touching their children.
    pub async fn delete_permanently(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Entry, AppError> {
        let entry = self
            .entries
            .get(id, &ctx.owner)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        if !entry.is_folder {
            let key = entry
                .file_url
                .as_deref()
                .and_then(resolve_key)
                .ok_or_else(|| AppError::validation("File URL is not valid"))?;

            remove_blob(self.blobs.as_ref(), &key).await.map_err(|e| {
                warn!(
                    owner_id = %ctx.owner,
                    entry_id = %id,
                    key = %key,
                    error = %e,
                    "Blob delete failed, keeping metadata"
                );
                AppError::with_source(
                    ErrorKind::ExternalService,
                    "Failed to delete file from blob store",
                    e,
                )
            })?;
        }

        let deleted = self
            .entries
            .delete(id, &ctx.owner)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        info!(owner_id = %ctx.owner, entry_id = %id, "Entry permanently deleted");
        Ok(deleted)
    }

    /// Delete every trashed entry of the caller.
    ///
    /// Blob cleanups run concurrently up to the configured limit and never
    /// abort the purge. The rows are then removed in one atomic statement,
    /// which also catches entries trashed after the listing.
    pub async fn empty_trash(&self, ctx: &RequestContext) -> Result<PurgeReport, AppError> {
        let trashed = self.entries.list_trashed(&ctx.owner).await?;
        if trashed.is_empty() {
            return Ok(PurgeReport::empty());
        }

        let blob_failures = self.clean_blobs(ctx, &trashed).await;
        let deleted = self.entries.delete_all_trashed(&ctx.owner).await?;

        info!(
            owner_id = %ctx.owner,
            trashed = trashed.len(),
            deleted = deleted.len(),
            blob_failures,
            "Trash emptied"
        );
        Ok(PurgeReport::finished(
            trashed.len(),
            blob_failures,
            deleted.len(),
        ))
    }

    /// Remove the blobs of all trashed files, returning the failure count.
    async fn clean_blobs(&self, ctx: &RequestContext, trashed: &[Entry]) -> usize {
        let targets: Vec<(Uuid, Option<String>)> = trashed
            .iter()
            .filter(|e| !e.is_folder)
            .map(|entry| {
                let key = entry
                    .file_url
                    .as_deref()
                    .and_then(resolve_key)
                    .or_else(|| entry.storage_path.as_deref().and_then(key_from_path));
                (entry.id, key)
            })
            .collect();

        let outcomes: Vec<bool> = stream::iter(targets)
            .map(|(entry_id, key)| {
                let blobs = Arc::clone(&self.blobs);
                let owner = ctx.owner.clone();
                async move {
                    let Some(key) = key else {
                        warn!(
                            owner_id = %owner,
                            entry_id = %entry_id,
                            "No blob key for trashed file, skipping cleanup"
                        );
                        return false;
                    };

                    match remove_blob(blobs.as_ref(), &key).await {
                        Ok(()) => true,
                        Err(e) => {
                            warn!(
                                owner_id = %owner,
                                entry_id = %entry_id,
                                key = %key,
                                error = %e,
                                "Blob cleanup failed during purge"
                            );
                            false
                        }
                    }
                }
            })
            .buffer_unordered(self.purge_concurrency)
            .collect()
            .await;

        outcomes.iter().filter(|ok| !**ok).count()
    }
}
