//! PostgreSQL entry repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use droply_core::error::{AppError, ErrorKind};
use droply_core::result::AppResult;
use droply_core::types::OwnerId;
use droply_entity::{CreateEntry, Entry, EntryPatch};

use super::EntryStore;

/// Entry repository backed by the `entries` table.
#[derive(Debug, Clone)]
pub struct EntryRepository {
    pool: PgPool,
}

impl EntryRepository {
    /// Create a new entry repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryStore for EntryRepository {
    async fn create(&self, data: CreateEntry) -> AppResult<Entry> {
        let is_folder = data.is_folder();
        let content = data.content;
        sqlx::query_as::<_, Entry>(
            "INSERT INTO entries (id, owner_id, parent_id, name, is_folder, size_bytes, \
             mime_type, storage_path, file_url, thumbnail_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.owner_id)
        .bind(data.parent_id)
        .bind(&data.name)
        .bind(is_folder)
        .bind(content.as_ref().map(|c| c.size_bytes))
        .bind(content.as_ref().map(|c| c.mime_type.as_str()))
        .bind(content.as_ref().map(|c| c.storage_path.as_str()))
        .bind(content.as_ref().map(|c| c.file_url.as_str()))
        .bind(content.as_ref().and_then(|c| c.thumbnail_url.as_deref()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create entry", e))
    }

    async fn get(&self, id: Uuid, owner: &OwnerId) -> AppResult<Option<Entry>> {
        sqlx::query_as::<_, Entry>("SELECT * FROM entries WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find entry", e))
    }

    async fn list_children(&self, owner: &OwnerId, parent: Option<Uuid>) -> AppResult<Vec<Entry>> {
        let query = match parent {
            Some(parent_id) => sqlx::query_as::<_, Entry>(
                "SELECT * FROM entries WHERE owner_id = $1 AND parent_id = $2 \
                 ORDER BY is_folder DESC, name ASC",
            )
            .bind(owner.as_str())
            .bind(parent_id),
            None => sqlx::query_as::<_, Entry>(
                "SELECT * FROM entries WHERE owner_id = $1 AND parent_id IS NULL \
                 ORDER BY is_folder DESC, name ASC",
            )
            .bind(owner.as_str()),
        };

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list entries", e))
    }

    async fn list_trashed(&self, owner: &OwnerId) -> AppResult<Vec<Entry>> {
        sqlx::query_as::<_, Entry>(
            "SELECT * FROM entries WHERE owner_id = $1 AND is_trashed ORDER BY updated_at DESC",
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list trashed entries", e)
        })
    }

    async fn update(
        &self,
        id: Uuid,
        owner: &OwnerId,
        patch: EntryPatch,
    ) -> AppResult<Option<Entry>> {
        sqlx::query_as::<_, Entry>(
            "UPDATE entries SET name = COALESCE($3, name), \
             is_starred = COALESCE($4, is_starred), \
             is_trashed = COALESCE($5, is_trashed), \
             updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 AND ($6::BOOLEAN IS NULL OR is_trashed = $6) \
             RETURNING *",
        )
        .bind(id)
        .bind(owner.as_str())
        .bind(patch.name)
        .bind(patch.is_starred)
        .bind(patch.is_trashed)
        .bind(patch.expect_trashed)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update entry", e))
    }

    async fn delete(&self, id: Uuid, owner: &OwnerId) -> AppResult<Option<Entry>> {
        sqlx::query_as::<_, Entry>(
            "DELETE FROM entries WHERE id = $1 AND owner_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(owner.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete entry", e))
    }

    async fn delete_all_trashed(&self, owner: &OwnerId) -> AppResult<Vec<Entry>> {
        sqlx::query_as::<_, Entry>(
            "DELETE FROM entries WHERE owner_id = $1 AND is_trashed RETURNING *",
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to purge trash", e))
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}
