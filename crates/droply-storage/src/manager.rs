//! Blob store construction from configuration.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use droply_core::config::storage::StorageConfig;
use droply_core::error::AppError;
use droply_core::result::AppResult;
use droply_core::traits::BlobStore;

use crate::providers::{LocalBlobStore, MemoryBlobStore, RemoteBlobStore};
use crate::timeout::TimeoutBlobStore;

/// Build the configured blob store, wrapped with the per-call deadline.
///
/// The returned handle is created once at start-up and shared by every
/// service that touches blob content.
pub async fn build_blob_store(config: &StorageConfig) -> AppResult<Arc<dyn BlobStore>> {
    let inner: Arc<dyn BlobStore> = match config.provider.as_str() {
        "remote" => Arc::new(RemoteBlobStore::new(&config.remote)?),
        "local" => Arc::new(
            LocalBlobStore::new(&config.local.root_path, &config.local.public_base_url).await?,
        ),
        "memory" => Arc::new(MemoryBlobStore::new()),
        other => {
            return Err(AppError::configuration(format!(
                "Unknown storage provider '{other}'"
            )));
        }
    };

    let limit = Duration::from_secs(config.operation_timeout_seconds);
    info!(
        provider = inner.provider_type(),
        timeout_secs = config.operation_timeout_seconds,
        "Blob store ready"
    );
    Ok(Arc::new(TimeoutBlobStore::new(inner, limit)))
}
