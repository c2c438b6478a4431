//! In-memory store backend: two `HashMap` collections behind `RwLock`s.
//!
//! Intended for tests and single-process deployments. Documents are cloned
//! on the way in and out, so callers never observe a partially merged
//! record.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::model::{CreateEntry, CreateList, Entry, List, UpdateEntry, UpdateList};
use crate::store::{StoreResult, TodoStore};

#[derive(Debug)]
pub struct MemoryStore {
    lists: RwLock<HashMap<Uuid, List>>,
    entries: RwLock<HashMap<Uuid, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            lists: RwLock::new(HashMap::new()),
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Malformed ids key nothing, so they behave exactly like missing ids.
fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn find_all_lists(&self) -> StoreResult<Vec<List>> {
        Ok(self.lists.read().await.values().cloned().collect())
    }

    async fn find_list(&self, id: &str) -> StoreResult<Option<List>> {
        let Some(key) = parse_id(id) else {
            return Ok(None);
        };
        Ok(self.lists.read().await.get(&key).cloned())
    }

    async fn insert_list(&self, new: CreateList) -> StoreResult<List> {
        let list = List {
            id: Uuid::new_v4(),
            name: new.name,
        };
        self.lists.write().await.insert(list.id, list.clone());
        Ok(list)
    }

    async fn update_list(&self, id: &str, patch: UpdateList) -> StoreResult<Option<List>> {
        let Some(key) = parse_id(id) else {
            return Ok(None);
        };
        let mut lists = self.lists.write().await;
        let Some(list) = lists.get_mut(&key) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            list.name = name;
        }
        Ok(Some(list.clone()))
    }

    async fn delete_list(&self, id: &str) -> StoreResult<bool> {
        let Some(key) = parse_id(id) else {
            return Ok(false);
        };
        Ok(self.lists.write().await.remove(&key).is_some())
    }

    async fn find_all_entries(&self) -> StoreResult<Vec<Entry>> {
        Ok(self.entries.read().await.values().cloned().collect())
    }

    async fn find_entries_for_list(&self, list_id: &str) -> StoreResult<Vec<Entry>> {
        Ok(self
            .entries
            .read()
            .await
            .values()
            .filter(|entry| entry.list_id == list_id)
            .cloned()
            .collect())
    }

    async fn find_entry(&self, id: &str) -> StoreResult<Option<Entry>> {
        let Some(key) = parse_id(id) else {
            return Ok(None);
        };
        Ok(self.entries.read().await.get(&key).cloned())
    }

    async fn insert_entry(&self, new: CreateEntry) -> StoreResult<Entry> {
        let entry = Entry {
            id: Uuid::new_v4(),
            list_id: new.list_id,
            name: new.name,
            done: new.done,
        };
        self.entries.write().await.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn update_entry(&self, id: &str, patch: UpdateEntry) -> StoreResult<Option<Entry>> {
        let Some(key) = parse_id(id) else {
            return Ok(None);
        };
        let mut entries = self.entries.write().await;
        let Some(entry) = entries.get_mut(&key) else {
            return Ok(None);
        };
        // patch.id is a client echo of `_id`, never a writable field.
        if let Some(list_id) = patch.list_id {
            entry.list_id = list_id;
        }
        if let Some(name) = patch.name {
            entry.name = name;
        }
        if let Some(done) = patch.done {
            entry.done = Some(done);
        }
        Ok(Some(entry.clone()))
    }

    async fn delete_entry(&self, id: &str) -> StoreResult<bool> {
        let Some(key) = parse_id(id) else {
            return Ok(false);
        };
        Ok(self.entries.write().await.remove(&key).is_some())
    }

    async fn delete_entries_for_list(&self, list_id: &str) -> StoreResult<u64> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.list_id != list_id);
        Ok((before - entries.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::new()
    }

    fn create_list(name: &str) -> CreateList {
        CreateList {
            name: name.to_string(),
        }
    }

    fn create_entry(list_id: &str, name: &str) -> CreateEntry {
        CreateEntry {
            list_id: list_id.to_string(),
            name: name.to_string(),
            done: None,
        }
    }

    // -----------------------------------------------------------------------
    // Lists
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn lists_start_empty() {
        assert!(store().find_all_lists().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_list_generates_unique_ids() {
        let store = store();
        let a = store.insert_list(create_list("a")).await.unwrap();
        let b = store.insert_list(create_list("b")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.find_all_lists().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn find_list_roundtrip() {
        let store = store();
        let created = store.insert_list(create_list("Groceries")).await.unwrap();
        let found = store
            .find_list(&created.id.to_string())
            .await
            .unwrap()
            .expect("should exist");
        assert_eq!(found.name, "Groceries");
    }

    #[tokio::test]
    async fn find_list_malformed_id_is_none() {
        let store = store();
        store.insert_list(create_list("x")).await.unwrap();
        assert!(store.find_list("not-an-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_list_missing_is_none() {
        let id = Uuid::new_v4().to_string();
        assert!(store().find_list(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_exists_fails_open_on_malformed_id() {
        let store = store();
        let created = store.insert_list(create_list("x")).await.unwrap();
        assert!(store.list_exists(&created.id.to_string()).await.unwrap());
        assert!(!store.list_exists(&Uuid::new_v4().to_string()).await.unwrap());
        assert!(!store.list_exists("garbage").await.unwrap());
    }

    #[tokio::test]
    async fn update_list_merges_name() {
        let store = store();
        let created = store.insert_list(create_list("before")).await.unwrap();
        let updated = store
            .update_list(
                &created.id.to_string(),
                UpdateList {
                    name: Some("after".to_string()),
                },
            )
            .await
            .unwrap()
            .expect("should match");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "after");
    }

    #[tokio::test]
    async fn update_list_with_empty_patch_keeps_document() {
        let store = store();
        let created = store.insert_list(create_list("same")).await.unwrap();
        let updated = store
            .update_list(&created.id.to_string(), UpdateList { name: None })
            .await
            .unwrap()
            .expect("should match");
        assert_eq!(updated.name, "same");
    }

    #[tokio::test]
    async fn update_list_missing_returns_none() {
        let result = store()
            .update_list(
                &Uuid::new_v4().to_string(),
                UpdateList {
                    name: Some("x".to_string()),
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_list_reports_whether_matched() {
        let store = store();
        let created = store.insert_list(create_list("x")).await.unwrap();
        let id = created.id.to_string();
        assert!(store.delete_list(&id).await.unwrap());
        assert!(!store.delete_list(&id).await.unwrap());
        assert!(!store.delete_list("malformed").await.unwrap());
    }

    // -----------------------------------------------------------------------
    // Entries
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn insert_entry_preserves_unset_done() {
        let store = store();
        let entry = store.insert_entry(create_entry("list-1", "Milk")).await.unwrap();
        let found = store
            .find_entry(&entry.id.to_string())
            .await
            .unwrap()
            .expect("should exist");
        assert_eq!(found.list_id, "list-1");
        assert!(found.done.is_none());
    }

    #[tokio::test]
    async fn find_entry_malformed_id_is_none() {
        assert!(store().find_entry("???").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_entry_merges_only_supplied_fields() {
        let store = store();
        let entry = store.insert_entry(create_entry("list-1", "Milk")).await.unwrap();
        let updated = store
            .update_entry(
                &entry.id.to_string(),
                UpdateEntry {
                    id: None,
                    list_id: None,
                    name: None,
                    done: Some(true),
                },
            )
            .await
            .unwrap()
            .expect("should match");
        assert_eq!(updated.name, "Milk");
        assert_eq!(updated.list_id, "list-1");
        assert_eq!(updated.done, Some(true));
    }

    #[tokio::test]
    async fn update_entry_can_reassign_list() {
        let store = store();
        let entry = store.insert_entry(create_entry("list-1", "Milk")).await.unwrap();
        let updated = store
            .update_entry(
                &entry.id.to_string(),
                UpdateEntry {
                    id: None,
                    list_id: Some("list-2".to_string()),
                    name: None,
                    done: None,
                },
            )
            .await
            .unwrap()
            .expect("should match");
        assert_eq!(updated.list_id, "list-2");
        assert_eq!(updated.name, "Milk");
    }

    #[tokio::test]
    async fn update_entry_ignores_echoed_id() {
        let store = store();
        let entry = store.insert_entry(create_entry("list-1", "Milk")).await.unwrap();
        let updated = store
            .update_entry(
                &entry.id.to_string(),
                UpdateEntry {
                    id: Some("spoofed".to_string()),
                    list_id: None,
                    name: None,
                    done: None,
                },
            )
            .await
            .unwrap()
            .expect("should match");
        assert_eq!(updated.id, entry.id);
    }

    #[tokio::test]
    async fn update_entry_missing_returns_none() {
        let result = store()
            .update_entry(
                &Uuid::new_v4().to_string(),
                UpdateEntry {
                    id: None,
                    list_id: None,
                    name: None,
                    done: Some(true),
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_entry_reports_whether_matched() {
        let store = store();
        let entry = store.insert_entry(create_entry("list-1", "Milk")).await.unwrap();
        let id = entry.id.to_string();
        assert!(store.delete_entry(&id).await.unwrap());
        assert!(!store.delete_entry(&id).await.unwrap());
    }

    // -----------------------------------------------------------------------
    // List-scoped queries and the cascade
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn find_entries_for_list_is_scoped() {
        let store = store();
        store.insert_entry(create_entry("list-1", "Milk")).await.unwrap();
        store.insert_entry(create_entry("list-1", "Eggs")).await.unwrap();
        store.insert_entry(create_entry("list-2", "Nails")).await.unwrap();

        let scoped = store.find_entries_for_list("list-1").await.unwrap();
        assert_eq!(scoped.len(), 2);
        assert!(scoped.iter().all(|entry| entry.list_id == "list-1"));
        assert!(store.find_entries_for_list("list-3").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_entries_for_list_counts_and_scopes() {
        let store = store();
        store.insert_entry(create_entry("list-1", "Milk")).await.unwrap();
        store.insert_entry(create_entry("list-1", "Eggs")).await.unwrap();
        let survivor = store.insert_entry(create_entry("list-2", "Nails")).await.unwrap();

        assert_eq!(store.delete_entries_for_list("list-1").await.unwrap(), 2);
        assert_eq!(store.delete_entries_for_list("list-1").await.unwrap(), 0);

        let remaining = store.find_all_entries().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, survivor.id);
    }
}
