//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use droply_auth::{IdentityVerifier, UploadCredentialIssuer};
use droply_core::config::AppConfig;
use droply_core::traits::BlobStore;
use droply_database::repositories::EntryStore;
use droply_service::{
    EntryService, FolderService, TrashService, UploadPolicy, UploadService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Metadata repository (PostgreSQL or in-memory)
    pub entry_store: Arc<dyn EntryStore>,
    /// Blob store client, already wrapped with the operation timeout
    pub blob_store: Arc<dyn BlobStore>,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token verifier
    pub verifier: Arc<IdentityVerifier>,
    /// Direct-upload credential issuer
    pub upload_credentials: Arc<UploadCredentialIssuer>,

    // ── Services ─────────────────────────────────────────────
    /// Browsing, rename, star, and trash toggle
    pub entry_service: Arc<EntryService>,
    /// File uploads
    pub upload_service: Arc<UploadService>,
    /// Folder creation
    pub folder_service: Arc<FolderService>,
    /// Hard-delete and purge
    pub trash_service: Arc<TrashService>,
}

impl AppState {
    /// Wire services over the given stores.
    pub fn new(
        config: AppConfig,
        entry_store: Arc<dyn EntryStore>,
        blob_store: Arc<dyn BlobStore>,
    ) -> Self {
        let policy = UploadPolicy::new(&config.upload, &config.storage);

        let entry_service = Arc::new(EntryService::new(Arc::clone(&entry_store)));
        let upload_service = Arc::new(UploadService::new(
            Arc::clone(&entry_store),
            Arc::clone(&blob_store),
            policy,
            &config.storage.root_folder,
        ));
        let folder_service = Arc::new(FolderService::new(Arc::clone(&entry_store)));
        let trash_service = Arc::new(TrashService::new(
            Arc::clone(&entry_store),
            Arc::clone(&blob_store),
            config.storage.purge_concurrency,
        ));

        Self {
            verifier: Arc::new(IdentityVerifier::new(&config.auth)),
            upload_credentials: Arc::new(UploadCredentialIssuer::new(&config.storage)),
            config: Arc::new(config),
            entry_store,
            blob_store,
            entry_service,
            upload_service,
            folder_service,
            trash_service,
        }
    }
}
