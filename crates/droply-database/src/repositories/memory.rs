//! In-process entry repository.
//!
//! Used for local development and as the metadata store in tests. A single
//! lock guards the whole map, so every method is atomic.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use droply_core::result::AppResult;
use droply_core::types::OwnerId;
use droply_entity::{CreateEntry, Entry, EntryPatch};

use super::EntryStore;

/// Entry repository held in memory.
#[derive(Debug, Default)]
pub struct MemoryEntryRepository {
    rows: RwLock<HashMap<Uuid, Entry>>,
}

impl MemoryEntryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows across all owners.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether no rows exist.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

fn sorted(mut entries: Vec<Entry>) -> Vec<Entry> {
    entries.sort_by(|a, b| b.is_folder.cmp(&a.is_folder).then_with(|| a.name.cmp(&b.name)));
    entries
}

#[async_trait]
impl EntryStore for MemoryEntryRepository {
    async fn create(&self, data: CreateEntry) -> AppResult<Entry> {
        let entry = data.into_entry(Uuid::new_v4(), Utc::now());
        self.rows.write().await.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn get(&self, id: Uuid, owner: &OwnerId) -> AppResult<Option<Entry>> {
        let rows = self.rows.read().await;
        Ok(rows.get(&id).filter(|e| e.is_owned_by(owner)).cloned())
    }

    async fn list_children(&self, owner: &OwnerId, parent: Option<Uuid>) -> AppResult<Vec<Entry>> {
        let rows = self.rows.read().await;
        Ok(sorted(
            rows.values()
                .filter(|e| e.is_owned_by(owner) && e.parent_id == parent)
                .cloned()
                .collect(),
        ))
    }

    async fn list_trashed(&self, owner: &OwnerId) -> AppResult<Vec<Entry>> {
        let rows = self.rows.read().await;
        let mut trashed: Vec<Entry> = rows
            .values()
            .filter(|e| e.is_owned_by(owner) && e.is_trashed)
            .cloned()
            .collect();
        trashed.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(trashed)
    }

    async fn update(
        &self,
        id: Uuid,
        owner: &OwnerId,
        patch: EntryPatch,
    ) -> AppResult<Option<Entry>> {
        let mut rows = self.rows.write().await;
        let Some(entry) = rows.get_mut(&id).filter(|e| e.is_owned_by(owner)) else {
            return Ok(None);
        };
        if !patch.guard_matches(entry) {
            return Ok(None);
        }
        patch.apply(entry, Utc::now());
        Ok(Some(entry.clone()))
    }

    async fn delete(&self, id: Uuid, owner: &OwnerId) -> AppResult<Option<Entry>> {
        let mut rows = self.rows.write().await;
        if rows.get(&id).is_some_and(|e| e.is_owned_by(owner)) {
            Ok(rows.remove(&id))
        } else {
            Ok(None)
        }
    }

    async fn delete_all_trashed(&self, owner: &OwnerId) -> AppResult<Vec<Entry>> {
        let mut rows = self.rows.write().await;
        let ids: Vec<Uuid> = rows
            .values()
            .filter(|e| e.is_owned_by(owner) && e.is_trashed)
            .map(|e| e.id)
            .collect();
        Ok(ids.into_iter().filter_map(|id| rows.remove(&id)).collect())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use droply_entity::EntryContent;

    fn owner(raw: &str) -> OwnerId {
        OwnerId::parse(raw).expect("valid owner")
    }

    fn file(owner: &OwnerId, parent: Option<Uuid>, name: &str) -> CreateEntry {
        CreateEntry::file(
            owner,
            parent,
            name,
            EntryContent {
                size_bytes: 10,
                mime_type: "image/png".into(),
                storage_path: format!("/droply/{owner}/{name}"),
                file_url: format!("https://cdn.test/droply/{owner}/{name}"),
                thumbnail_url: None,
            },
        )
    }

    #[tokio::test]
    async fn test_owner_scoping() {
        let repo = MemoryEntryRepository::new();
        let alice = owner("alice");
        let bob = owner("bob");
        let entry = repo.create(file(&alice, None, "a.png")).await.expect("create");

        assert!(repo.get(entry.id, &bob).await.expect("get").is_none());
        assert!(
            repo.update(entry.id, &bob, EntryPatch::starred(true))
                .await
                .expect("update")
                .is_none()
        );
        assert!(repo.delete(entry.id, &bob).await.expect("delete").is_none());
        assert_eq!(repo.len().await, 1);
        assert!(repo.get(entry.id, &alice).await.expect("get").is_some());
    }

    #[tokio::test]
    async fn test_list_children_root_and_folder() {
        let repo = MemoryEntryRepository::new();
        let alice = owner("alice");
        let folder = repo
            .create(CreateEntry::folder(&alice, None, "Docs"))
            .await
            .expect("folder");
        repo.create(file(&alice, Some(folder.id), "b.png")).await.expect("child");
        repo.create(file(&alice, None, "a.png")).await.expect("root file");

        let root = repo.list_children(&alice, None).await.expect("root");
        assert_eq!(root.len(), 2);
        assert!(root[0].is_folder, "folders sort first");

        let inside = repo.list_children(&alice, Some(folder.id)).await.expect("inside");
        assert_eq!(inside.len(), 1);
        assert_eq!(inside[0].name, "b.png");
    }

    #[tokio::test]
    async fn test_guarded_update_rejects_stale_flag() {
        let repo = MemoryEntryRepository::new();
        let alice = owner("alice");
        let entry = repo.create(file(&alice, None, "a.png")).await.expect("create");

        let first = repo
            .update(entry.id, &alice, EntryPatch::toggle_trash(false))
            .await
            .expect("update");
        assert!(first.is_some_and(|e| e.is_trashed));

        let stale = repo
            .update(entry.id, &alice, EntryPatch::toggle_trash(false))
            .await
            .expect("update");
        assert!(stale.is_none());
    }

    #[tokio::test]
    async fn test_delete_all_trashed_only_touches_owner() {
        let repo = MemoryEntryRepository::new();
        let alice = owner("alice");
        let bob = owner("bob");
        let a = repo.create(file(&alice, None, "a.png")).await.expect("a");
        let b = repo.create(file(&bob, None, "b.png")).await.expect("b");
        repo.create(file(&alice, None, "keep.png")).await.expect("keep");
        repo.update(a.id, &alice, EntryPatch::toggle_trash(false)).await.expect("trash a");
        repo.update(b.id, &bob, EntryPatch::toggle_trash(false)).await.expect("trash b");

        let removed = repo.delete_all_trashed(&alice).await.expect("purge");
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].id, a.id);
        assert_eq!(repo.len().await, 2);
        assert!(repo.delete_all_trashed(&alice).await.expect("again").is_empty());
    }
}
