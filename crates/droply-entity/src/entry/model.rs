//! Entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use droply_core::types::OwnerId;

/// A file or folder owned by one user.
///
/// Content columns are only populated for files. Folders carry none of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// The owning user.
    #[serde(rename = "userId")]
    pub owner_id: String,
    /// Containing folder, `None` at root level.
    pub parent_id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// Whether children may reference this entry.
    pub is_folder: bool,
    /// Content size in bytes.
    pub size_bytes: Option<i64>,
    /// MIME type as reported at upload.
    pub mime_type: Option<String>,
    /// Object path inside the blob store.
    pub storage_path: Option<String>,
    /// Public content URL issued by the blob store.
    pub file_url: Option<String>,
    /// Thumbnail URL issued by the blob store.
    pub thumbnail_url: Option<String>,
    /// User-toggled favourite marker.
    pub is_starred: bool,
    /// Shared marker (metadata only).
    pub is_shared: bool,
    /// Soft-delete marker.
    pub is_trashed: bool,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// When the entry was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    /// Whether `owner` owns this entry.
    pub fn is_owned_by(&self, owner: &OwnerId) -> bool {
        owner == self.owner_id.as_str()
    }

    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.name)
    }

    /// Past-tense verb describing the current trash state.
    pub fn trash_verb(&self) -> &'static str {
        if self.is_trashed { "trashed" } else { "restored" }
    }
}

/// Lower-cased text after the last `.` of `name`, if non-empty.
pub fn extension_of(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_lowercase())
    }
}

/// Content columns of a file entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryContent {
    /// Size in bytes.
    pub size_bytes: i64,
    /// MIME type.
    pub mime_type: String,
    /// Object path inside the blob store.
    pub storage_path: String,
    /// Public content URL.
    pub file_url: String,
    /// Thumbnail URL.
    pub thumbnail_url: Option<String>,
}

/// Data required to create a new entry row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEntry {
    /// The owning user.
    pub owner_id: String,
    /// Containing folder.
    pub parent_id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// File content, `None` for folders.
    pub content: Option<EntryContent>,
}

impl CreateEntry {
    /// A folder row.
    pub fn folder(owner: &OwnerId, parent_id: Option<Uuid>, name: impl Into<String>) -> Self {
        Self {
            owner_id: owner.as_str().to_string(),
            parent_id,
            name: name.into(),
            content: None,
        }
    }

    /// A file row pointing at an already stored blob.
    pub fn file(
        owner: &OwnerId,
        parent_id: Option<Uuid>,
        name: impl Into<String>,
        content: EntryContent,
    ) -> Self {
        Self {
            owner_id: owner.as_str().to_string(),
            parent_id,
            name: name.into(),
            content: Some(content),
        }
    }

    /// Whether this describes a folder.
    pub fn is_folder(&self) -> bool {
        self.content.is_none()
    }

    /// Materialize the row as the metadata store would insert it.
    pub fn into_entry(self, id: Uuid, now: DateTime<Utc>) -> Entry {
        let is_folder = self.is_folder();
        let content = self.content;
        Entry {
            id,
            owner_id: self.owner_id,
            parent_id: self.parent_id,
            name: self.name,
            is_folder,
            size_bytes: content.as_ref().map(|c| c.size_bytes),
            mime_type: content.as_ref().map(|c| c.mime_type.clone()),
            storage_path: content.as_ref().map(|c| c.storage_path.clone()),
            file_url: content.as_ref().map(|c| c.file_url.clone()),
            thumbnail_url: content.and_then(|c| c.thumbnail_url),
            is_starred: false,
            is_shared: false,
            is_trashed: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A partial update of an entry row.
///
/// `expect_trashed` turns the update into a compare-and-swap: it applies
/// only if the stored trash flag still equals the given value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    /// New display name.
    pub name: Option<String>,
    /// New star flag.
    pub is_starred: Option<bool>,
    /// New trash flag.
    pub is_trashed: Option<bool>,
    /// Required current trash flag.
    pub expect_trashed: Option<bool>,
}

impl EntryPatch {
    /// Rename only.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the star flag.
    pub fn starred(value: bool) -> Self {
        Self {
            is_starred: Some(value),
            ..Self::default()
        }
    }

    /// Flip the trash flag from `current` to `!current`, guarded on `current`.
    pub fn toggle_trash(current: bool) -> Self {
        Self {
            is_trashed: Some(!current),
            expect_trashed: Some(current),
            ..Self::default()
        }
    }

    /// Whether the guard (if any) accepts an entry.
    pub fn guard_matches(&self, entry: &Entry) -> bool {
        self.expect_trashed.is_none_or(|t| t == entry.is_trashed)
    }

    /// Apply the patch in place, bumping `updated_at`.
    pub fn apply(&self, entry: &mut Entry, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            entry.name = name.clone();
        }
        if let Some(starred) = self.is_starred {
            entry.is_starred = starred;
        }
        if let Some(trashed) = self.is_trashed {
            entry.is_trashed = trashed;
        }
        entry.updated_at = now;
    }
}
