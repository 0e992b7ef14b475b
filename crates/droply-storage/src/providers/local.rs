//! Local filesystem blob store.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use droply_core::error::{AppError, ErrorKind};
use droply_core::result::AppResult;
use droply_core::traits::{BlobStore, StoredBlob};

/// Blob store writing objects below a root directory.
///
/// Native ids are paths relative to the root (with a leading `/`), which is
/// also what [`StoredBlob::file_path`] carries.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    /// Create a store rooted at `root_path`, creating the directory.
    pub async fn new(root_path: &str, public_base_url: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a store path below the root, refusing parent traversal.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(AppError::validation(format!("Invalid blob path: {path}")));
        }
        Ok(self.root.join(relative))
    }

    /// Store path (leading `/`) of an absolute path below the root.
    fn store_path(&self, full: &Path) -> Option<String> {
        let relative = full.strip_prefix(&self.root).ok()?;
        let joined = relative
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .collect::<Vec<_>>()
            .join("/");
        Some(format!("/{joined}"))
    }

    /// Depth-first search for a regular file named `name`.
    async fn find_file(&self, name: &str) -> AppResult<Option<PathBuf>> {
        let mut pending = vec![self.root.clone()];
        while let Some(dir) = pending.pop() {
            let mut entries = fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let file_type = entry.file_type().await?;
                if file_type.is_dir() {
                    pending.push(entry.path());
                } else if entry.file_name().to_str() == Some(name) {
                    return Ok(Some(entry.path()));
                }
            }
        }
        Ok(None)
    }

    async fn remove(&self, full: &Path) -> AppResult<()> {
        match fs::remove_file(full).await {
            Ok(()) => {
                debug!(path = %full.display(), "Deleted local blob");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete blob: {}", full.display()),
                e,
            )),
        }
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root).await.is_ok_and(|m| m.is_dir()))
    }

    async fn store(&self, data: Bytes, file_name: &str, folder: &str) -> AppResult<StoredBlob> {
        let file_path = format!("{}/{}", folder.trim_end_matches('/'), file_name);
        let full = self.resolve(&file_path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create blob folder: {}", parent.display()),
                    e,
                )
            })?;
        }
        fs::write(&full, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write blob: {file_path}"),
                e,
            )
        })?;

        let file_path = format!("/{}", file_path.trim_start_matches('/'));
        debug!(path = %file_path, size = data.len(), "Stored local blob");
        Ok(StoredBlob {
            store_id: file_path.clone(),
            url: format!("{}{}", self.public_base_url, file_path),
            file_path,
            thumbnail_url: None,
        })
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<String>> {
        let found = self.find_file(name).await?;
        Ok(found.and_then(|path| self.store_path(&path)))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        if key.contains('/') {
            let full = self.resolve(key)?;
            return self.remove(&full).await;
        }
        match self.find_file(key).await? {
            Some(full) => self.remove(&full).await,
            None => Ok(()),
        }
    }
}
