//! Upload admission checks run before any blob is written.

use droply_core::config::storage::StorageConfig;
use droply_core::config::upload::UploadConfig;
use droply_core::error::AppError;
use droply_entity::entry::extension_of;

/// Decides whether an upload may proceed.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    allowed_extensions: Vec<String>,
    allowed_content_types: Vec<String>,
    require_parent_for_files: bool,
    max_upload_size_bytes: u64,
}

impl UploadPolicy {
    /// Build the policy from configuration.
    pub fn new(upload: &UploadConfig, storage: &StorageConfig) -> Self {
        Self {
            allowed_extensions: upload
                .allowed_extensions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
            allowed_content_types: upload
                .allowed_content_types
                .iter()
                .map(|c| c.to_lowercase())
                .collect(),
            require_parent_for_files: upload.require_parent_for_files,
            max_upload_size_bytes: storage.max_upload_size_bytes,
        }
    }

    /// Whether files must be placed inside a folder.
    pub fn requires_parent(&self) -> bool {
        self.require_parent_for_files
    }

    /// Largest accepted upload in bytes.
    pub fn max_upload_size_bytes(&self) -> u64 {
        self.max_upload_size_bytes
    }

    /// Check name, content type, extension, and size. Returns the lower-cased
    /// extension.
    pub fn check(&self, name: &str, content_type: &str, size: u64) -> Result<String, AppError> {
        if name.trim().is_empty() {
            return Err(AppError::validation("File name must not be empty"));
        }

        let content_type = content_type.to_lowercase();
        if !self
            .allowed_content_types
            .iter()
            .any(|allowed| content_type.starts_with(allowed.as_str()))
        {
            return Err(AppError::validation(
                "Only images and PDF files are supported",
            ));
        }

        let ext = extension_of(name)
            .ok_or_else(|| AppError::validation("File extension is required"))?;
        if !self.allowed_extensions.contains(&ext) {
            return Err(AppError::validation(format!(
                "File extension '{ext}' is not allowed"
            )));
        }

        if size > self.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds maximum upload size of {} bytes",
                self.max_upload_size_bytes
            )));
        }

        Ok(ext)
    }
}
