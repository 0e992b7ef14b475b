//! Deadline decorator for blob store calls.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::warn;

use droply_core::error::{AppError, ErrorKind};
use droply_core::result::AppResult;
use droply_core::traits::{BlobStore, StoredBlob};

/// Wraps a blob store so that every call fails with
/// [`ErrorKind::Timeout`] once `limit` elapses.
#[derive(Debug, Clone)]
pub struct TimeoutBlobStore {
    inner: Arc<dyn BlobStore>,
    limit: Duration,
}

impl TimeoutBlobStore {
    /// Wrap `inner` with a per-call deadline.
    pub fn new(inner: Arc<dyn BlobStore>, limit: Duration) -> Self {
        Self { inner, limit }
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        match tokio::time::timeout(self.limit, fut).await {
            Ok(result) => result,
            Err(elapsed) => {
                warn!(
                    provider = self.inner.provider_type(),
                    operation,
                    limit_ms = self.limit.as_millis() as u64,
                    "Blob store call timed out"
                );
                Err(AppError::with_source(
                    ErrorKind::Timeout,
                    format!("Blob store {operation} timed out"),
                    elapsed,
                ))
            }
        }
    }
}

#[async_trait]
impl BlobStore for TimeoutBlobStore {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.bounded("health_check", self.inner.health_check()).await
    }

    async fn store(&self, data: Bytes, file_name: &str, folder: &str) -> AppResult<StoredBlob> {
        self.bounded("store", self.inner.store(data, file_name, folder))
            .await
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<String>> {
        self.bounded("find_by_name", self.inner.find_by_name(name))
            .await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.bounded("delete", self.inner.delete(key)).await
    }
}
