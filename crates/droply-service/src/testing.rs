//! Shared test doubles.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use droply_core::error::AppError;
use droply_core::result::AppResult;
use droply_core::traits::{BlobStore, StoredBlob};
use droply_core::types::OwnerId;
use droply_storage::providers::MemoryBlobStore;

use crate::context::RequestContext;

/// Memory blob store with scripted failures and call counters.
#[derive(Debug, Default)]
pub struct FlakyBlobStore {
    pub inner: MemoryBlobStore,
    pub fail_store: bool,
    pub fail_lookup: bool,
    pub fail_delete: Mutex<HashSet<String>>,
    pub store_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl FlakyBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make deletion of any object whose path or name contains `fragment` fail.
    pub fn fail_delete_of(&self, fragment: &str) {
        self.fail_delete
            .lock()
            .expect("lock")
            .insert(fragment.to_string());
    }

    pub fn stores(&self) -> usize {
        self.store_calls.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlobStore for FlakyBlobStore {
    fn provider_type(&self) -> &str {
        "flaky"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn store(&self, data: Bytes, file_name: &str, folder: &str) -> AppResult<StoredBlob> {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_store {
            return Err(AppError::external_service("upload refused"));
        }
        self.inner.store(data, file_name, folder).await
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<String>> {
        if self.fail_lookup {
            return Err(AppError::external_service("search unavailable"));
        }
        self.inner.find_by_name(name).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .fail_delete
            .lock()
            .expect("lock")
            .iter()
            .any(|f| key.contains(f.as_str()));
        if failing {
            return Err(AppError::external_service("delete refused"));
        }
        self.inner.delete(key).await
    }
}

pub fn ctx(owner: &str) -> RequestContext {
    RequestContext::new(OwnerId::parse(owner).expect("valid owner"))
}
