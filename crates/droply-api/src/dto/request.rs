//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Query string of `GET /api/entries`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntriesQuery {
    /// Caller's own id as known to the client.
    pub user_id: Option<String>,
    /// Folder to list. Absent or blank lists the root set.
    pub parent_id: Option<String>,
}

/// Body of `POST /api/folders`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Folder name is required"))]
    pub name: String,
    /// Containing folder, root when absent.
    pub parent_id: Option<Uuid>,
    /// Caller's own id as known to the client.
    pub user_id: Option<String>,
}

/// Body of `PATCH /api/entries/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameRequest {
    /// New display name.
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
}
