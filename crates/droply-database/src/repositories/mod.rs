//! Entry repositories.
//!
//! Every method is scoped by owner. An entry that exists under another
//! owner is indistinguishable from one that does not exist.

pub mod entry;
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use droply_core::result::AppResult;
use droply_core::types::OwnerId;
use droply_entity::{CreateEntry, Entry, EntryPatch};

pub use entry::EntryRepository;
pub use memory::MemoryEntryRepository;

/// Metadata store contract for entries.
#[async_trait]
pub trait EntryStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new row and return it.
    async fn create(&self, entry: CreateEntry) -> AppResult<Entry>;

    /// Fetch one entry.
    async fn get(&self, id: Uuid, owner: &OwnerId) -> AppResult<Option<Entry>>;

    /// Immediate children of `parent`, or the root set when `parent` is `None`.
    async fn list_children(&self, owner: &OwnerId, parent: Option<Uuid>) -> AppResult<Vec<Entry>>;

    /// Every trashed entry regardless of position.
    async fn list_trashed(&self, owner: &OwnerId) -> AppResult<Vec<Entry>>;

    /// Apply `patch`. `None` if the row is missing or the patch guard
    /// rejected it.
    async fn update(&self, id: Uuid, owner: &OwnerId, patch: EntryPatch)
    -> AppResult<Option<Entry>>;

    /// Remove one row, returning it.
    async fn delete(&self, id: Uuid, owner: &OwnerId) -> AppResult<Option<Entry>>;

    /// Remove every trashed row in one atomic statement.
    async fn delete_all_trashed(&self, owner: &OwnerId) -> AppResult<Vec<Entry>>;

    /// Check whether the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
