//! File upload: admission checks, blob write, then the metadata row.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{error, info};
use uuid::Uuid;

use droply_core::error::AppError;
use droply_core::traits::BlobStore;
use droply_database::repositories::EntryStore;
use droply_entity::{CreateEntry, Entry, EntryContent};

use super::parent::resolve_parent;
use crate::context::RequestContext;
use crate::policy::UploadPolicy;

/// A single-request upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Target folder, `None` for root.
    pub parent_id: Option<Uuid>,
    /// Original file name as sent by the client.
    pub file_name: String,
    /// Declared MIME type.
    pub content_type: String,
    /// File content.
    pub data: Bytes,
}

/// Creates file entries.
#[derive(Debug, Clone)]
pub struct UploadService {
    entries: Arc<dyn EntryStore>,
    blobs: Arc<dyn BlobStore>,
    policy: UploadPolicy,
    root_folder: String,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        entries: Arc<dyn EntryStore>,
        blobs: Arc<dyn BlobStore>,
        policy: UploadPolicy,
        root_folder: &str,
    ) -> Self {
        Self {
            entries,
            blobs,
            policy,
            root_folder: root_folder.trim_end_matches('/').to_string(),
        }
    }

    /// Blob folder for an upload by `ctx` into `parent_id`.
    fn blob_folder(&self, ctx: &RequestContext, parent_id: Option<Uuid>) -> String {
        match parent_id {
            Some(parent) => format!("{}/{}/folder/{}", self.root_folder, ctx.owner, parent),
            None => format!("{}/{}", self.root_folder, ctx.owner),
        }
    }

    /// Upload a file.
    ///
    /// Nothing is written anywhere until the request passes the policy and
    /// the parent check. If the row insert fails after the blob was stored,
    /// the blob is left behind and logged for reconciliation.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        request: UploadRequest,
    ) -> Result<Entry, AppError> {
        let ext = self.policy.check(
            &request.file_name,
            &request.content_type,
            request.data.len() as u64,
        )?;

        match request.parent_id {
            Some(parent_id) => {
                resolve_parent(self.entries.as_ref(), ctx, parent_id).await?;
            }
            None if self.policy.requires_parent() => {
                return Err(AppError::validation("Parent folder is required"));
            }
            None => {}
        }

        let blob_name = format!("{}-{}", Uuid::new_v4(), ext);
        let folder = self.blob_folder(ctx, request.parent_id);
        let size_bytes = request.data.len() as i64;

        let blob = self.blobs.store(request.data, &blob_name, &folder).await?;

        let create = CreateEntry::file(
            &ctx.owner,
            request.parent_id,
            request.file_name,
            EntryContent {
                size_bytes,
                mime_type: request.content_type,
                storage_path: blob.file_path.clone(),
                file_url: blob.url.clone(),
                thumbnail_url: blob.thumbnail_url.clone(),
            },
        );

        match self.entries.create(create).await {
            Ok(entry) => {
                info!(
                    owner_id = %ctx.owner,
                    entry_id = %entry.id,
                    size = size_bytes,
                    path = %blob.file_path,
                    "File uploaded"
                );
                Ok(entry)
            }
            Err(e) => {
                error!(
                    owner_id = %ctx.owner,
                    path = %blob.file_path,
                    store_id = %blob.store_id,
                    error = %e,
                    "Metadata insert failed after blob upload, blob leaked"
                );
                Err(e)
            }
        }
    }
}
