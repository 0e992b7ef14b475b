//! Upload admission rules.

use serde::{Deserialize, Serialize};

/// Which uploads are accepted before any blob is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Lower-case file extensions accepted for upload.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
    /// Content type prefixes accepted for upload (`"image/"` matches any image).
    #[serde(default = "default_allowed_content_types")]
    pub allowed_content_types: Vec<String>,
    /// Files must be placed inside a folder; folders may still live at root.
    #[serde(default = "default_require_parent")]
    pub require_parent_for_files: bool,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: default_allowed_extensions(),
            allowed_content_types: default_allowed_content_types(),
            require_parent_for_files: default_require_parent(),
        }
    }
}

fn default_allowed_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "pdf"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_allowed_content_types() -> Vec<String> {
    vec!["image/".to_string(), "application/pdf".to_string()]
}

fn default_require_parent() -> bool {
    true
}
