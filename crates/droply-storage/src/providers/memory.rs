//! In-process blob store for development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use droply_core::result::AppResult;
use droply_core::traits::{BlobStore, StoredBlob};

#[derive(Debug, Clone)]
struct Object {
    name: String,
    data: Bytes,
}

/// Blob store held in memory. Native ids are the full object paths.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    objects: RwLock<HashMap<String, Object>>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Whether no objects are stored.
    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    /// Whether an object with file name `name` exists.
    pub async fn contains_name(&self, name: &str) -> bool {
        self.objects.read().await.values().any(|o| o.name == name)
    }

    /// Content of the object at `path`.
    pub async fn read(&self, path: &str) -> Option<Bytes> {
        self.objects.read().await.get(path).map(|o| o.data.clone())
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn store(&self, data: Bytes, file_name: &str, folder: &str) -> AppResult<StoredBlob> {
        let file_path = format!("{}/{}", folder.trim_end_matches('/'), file_name);
        self.objects.write().await.insert(
            file_path.clone(),
            Object {
                name: file_name.to_string(),
                data,
            },
        );
        Ok(StoredBlob {
            store_id: file_path.clone(),
            url: format!("memory://{}", file_path.trim_start_matches('/')),
            file_path,
            thumbnail_url: None,
        })
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<String>> {
        let objects = self.objects.read().await;
        Ok(objects
            .iter()
            .find(|(_, o)| o.name == name)
            .map(|(path, _)| path.clone()))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let mut objects = self.objects.write().await;
        if objects.remove(key).is_none() {
            objects.retain(|_, o| o.name != key);
        }
        Ok(())
    }
}
