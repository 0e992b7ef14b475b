//! Response DTOs.

use serde::{Deserialize, Serialize};

use droply_entity::Entry;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// An entry together with a human-readable outcome.
#[derive(Debug, Clone, Serialize)]
pub struct EntryMessage {
    /// Affected entry.
    pub file: Entry,
    /// Outcome, e.g. "File successfully trashed".
    pub message: String,
}

impl EntryMessage {
    pub fn new(file: Entry, message: impl Into<String>) -> Self {
        Self {
            file,
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// "ok" when every dependency answered, otherwise "degraded".
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Metadata store status.
    pub database: String,
    /// Blob store status and provider.
    pub blob_store: String,
}
