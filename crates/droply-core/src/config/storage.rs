//! Blob store configuration.

use serde::{Deserialize, Serialize};

/// Top-level blob store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Blob store backend: `"remote"`, `"local"`, or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Folder under which every owner's blobs are placed.
    #[serde(default = "default_root_folder")]
    pub root_folder: String,
    /// Deadline applied to every single blob store call.
    #[serde(default = "default_operation_timeout")]
    pub operation_timeout_seconds: u64,
    /// Maximum blob deletions in flight during a trash purge.
    #[serde(default = "default_purge_concurrency")]
    pub purge_concurrency: usize,
    /// Maximum upload size in bytes (default 25 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Lifetime of client upload credentials in seconds.
    #[serde(default = "default_upload_token_ttl")]
    pub upload_token_ttl_seconds: u64,
    /// Remote media API settings.
    #[serde(default)]
    pub remote: RemoteStorageConfig,
    /// Local filesystem settings.
    #[serde(default)]
    pub local: LocalStorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            root_folder: default_root_folder(),
            operation_timeout_seconds: default_operation_timeout(),
            purge_concurrency: default_purge_concurrency(),
            max_upload_size_bytes: default_max_upload(),
            upload_token_ttl_seconds: default_upload_token_ttl(),
            remote: RemoteStorageConfig::default(),
            local: LocalStorageConfig::default(),
        }
    }
}

/// Remote media API (upload, search by name, delete by id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteStorageConfig {
    /// Public URL prefix under which delivered files are served.
    #[serde(default)]
    pub url_endpoint: String,
    /// Upload endpoint.
    #[serde(default = "default_upload_endpoint")]
    pub upload_endpoint: String,
    /// Management API base (file listing and deletion).
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,
    /// Public API key handed to clients.
    #[serde(default)]
    pub public_key: String,
    /// Private API key; never leaves the server.
    #[serde(default)]
    pub private_key: String,
}

impl Default for RemoteStorageConfig {
    fn default() -> Self {
        Self {
            url_endpoint: String::new(),
            upload_endpoint: default_upload_endpoint(),
            api_endpoint: default_api_endpoint(),
            public_key: String::new(),
            private_key: String::new(),
        }
    }
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Root path for local file storage.
    #[serde(default = "default_local_root")]
    pub root_path: String,
    /// Base URL that maps onto `root_path` when building content URLs.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
            public_base_url: default_public_base_url(),
        }
    }
}

fn default_provider() -> String {
    "remote".to_string()
}

fn default_root_folder() -> String {
    "/droply".to_string()
}

fn default_operation_timeout() -> u64 {
    15
}

fn default_purge_concurrency() -> usize {
    8
}

fn default_max_upload() -> u64 {
    26_214_400 // 25 MB
}

/// Upper bound for `upload_token_ttl_seconds` (one week).
pub const MAX_UPLOAD_TOKEN_TTL_SECONDS: u64 = 7 * 24 * 60 * 60;

fn default_upload_token_ttl() -> u64 {
    1800
}

fn default_upload_endpoint() -> String {
    "https://upload.imagekit.io/api/v1/files/upload".to_string()
}

fn default_api_endpoint() -> String {
    "https://api.imagekit.io/v1".to_string()
}

fn default_local_root() -> String {
    "./data/blobs".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8080/blobs".to_string()
}
