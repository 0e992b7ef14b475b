//! Blob store trait for the external object store holding file content.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// What the blob store hands back after accepting an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBlob {
    /// Store-native identifier, used for deletion.
    pub store_id: String,
    /// Path of the object inside the store (folder plus file name).
    pub file_path: String,
    /// Public content URL.
    pub url: String,
    /// Thumbnail URL, when the store renders one.
    pub thumbnail_url: Option<String>,
}

/// Trait for blob store backends.
///
/// The store addresses objects by a store-native id that differs from the
/// public URL. [`BlobStore::find_by_name`] bridges the two: it looks an
/// object up by the last segment of its URL and returns the native id.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "remote", "local").
    fn provider_type(&self) -> &str;

    /// Check whether the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Upload `data` as `file_name` inside `folder`.
    async fn store(&self, data: Bytes, file_name: &str, folder: &str) -> AppResult<StoredBlob>;

    /// Look an object up by file name. `Ok(None)` means nothing matched.
    async fn find_by_name(&self, name: &str) -> AppResult<Option<String>>;

    /// Delete an object by key or native id. Deleting a missing object
    /// succeeds.
    async fn delete(&self, key: &str) -> AppResult<()>;
}
