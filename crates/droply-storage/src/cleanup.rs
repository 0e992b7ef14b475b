//! Blob removal chain shared by single delete and trash purge.

use tracing::{debug, warn};

use droply_core::result::AppResult;
use droply_core::traits::BlobStore;

/// Remove the blob known by `key`.
///
/// The key is the last URL segment, which is not necessarily the store's
/// native id. Look it up by name first and delete the native id when found.
/// When nothing matches, or the lookup itself fails, delete by the key as
/// given. Only the final deletion decides the outcome.
pub async fn remove_blob(store: &dyn BlobStore, key: &str) -> AppResult<()> {
    match store.find_by_name(key).await {
        Ok(Some(native_id)) => {
            debug!(key = %key, native_id = %native_id, "Deleting blob by native id");
            store.delete(&native_id).await
        }
        Ok(None) => {
            debug!(key = %key, "No blob matched by name, deleting by key");
            store.delete(key).await
        }
        Err(e) => {
            warn!(key = %key, error = %e, "Blob lookup failed, deleting by key");
            store.delete(key).await
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use bytes::Bytes;

    use droply_core::error::AppError;
    use droply_core::traits::StoredBlob;

    use super::*;

    #[derive(Debug, Default)]
    struct Recording {
        lookup: Option<Result<Option<String>, ()>>,
        delete_fails: bool,
        deleted: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl BlobStore for Recording {
        fn provider_type(&self) -> &str {
            "recording"
        }

        async fn health_check(&self) -> AppResult<bool> {
            Ok(true)
        }

        async fn store(&self, _data: Bytes, _name: &str, _folder: &str) -> AppResult<StoredBlob> {
            Err(AppError::internal("not used"))
        }

        async fn find_by_name(&self, _name: &str) -> AppResult<Option<String>> {
            match self.lookup.clone() {
                Some(Ok(found)) => Ok(found),
                Some(Err(())) => Err(AppError::external_service("search down")),
                None => Ok(None),
            }
        }

        async fn delete(&self, key: &str) -> AppResult<()> {
            if self.delete_fails {
                return Err(AppError::external_service("delete refused"));
            }
            self.deleted.lock().expect("lock").push(key.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_found_by_name_deletes_native_id() {
        let store = Recording {
            lookup: Some(Ok(Some("native-1".into()))),
            ..Default::default()
        };
        remove_blob(&store, "abc-png").await.expect("removed");
        assert_eq!(*store.deleted.lock().expect("lock"), vec!["native-1"]);
    }

    #[tokio::test]
    async fn test_not_found_deletes_key() {
        let store = Recording::default();
        remove_blob(&store, "abc-png").await.expect("removed");
        assert_eq!(*store.deleted.lock().expect("lock"), vec!["abc-png"]);
    }

    #[tokio::test]
    async fn test_lookup_error_falls_back_to_key() {
        let store = Recording {
            lookup: Some(Err(())),
            ..Default::default()
        };
        remove_blob(&store, "abc-png").await.expect("removed");
        assert_eq!(*store.deleted.lock().expect("lock"), vec!["abc-png"]);
    }

    #[tokio::test]
    async fn test_delete_failure_surfaces() {
        let store = Recording {
            delete_fails: true,
            ..Default::default()
        };
        let err = remove_blob(&store, "abc-png").await.unwrap_err();
        assert!(err.kind.is_upstream());
    }
}
