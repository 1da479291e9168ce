//! In-process document store.
//!
//! Keeps documents in insertion order per collection. Selected with
//! `DATABASE_URL=memory://` and used by the test suites, which can take it
//! offline to exercise the fallback paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Collection, Document, DocumentStore, Filter, StoreError, StoredDocument};

#[derive(Debug)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, Vec<StoredDocument>>>,
    online: AtomicBool,
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            online: AtomicBool::new(true),
        }
    }

    /// A store that fails every operation until brought back online.
    #[must_use]
    pub fn offline() -> Self {
        let store = Self::new();
        store.set_online(false);
        store
    }

    /// Simulate the store going down (`false`) or recovering (`true`).
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory store is offline".to_string()))
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: Collection, body: Document) -> Result<Uuid, StoreError> {
        self.check_online()?;
        let key = Uuid::new_v4();
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(StoredDocument { key, body });
        Ok(key)
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        self.check_online()?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .into_iter()
            .flatten()
            .filter(|doc| filter.matches(&doc.body))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_by_key(
        &self,
        collection: Collection,
        key: Uuid,
    ) -> Result<Option<StoredDocument>, StoreError> {
        self.check_online()?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|doc| doc.key == key))
            .cloned())
    }

    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        self.check_online()?;
        let collections = self.collections.read().await;
        let len = collections.get(&collection).map_or(0, Vec::len);
        Ok(u64::try_from(len).unwrap_or(u64::MAX))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::db::to_document;

    #[tokio::test]
    async fn test_insert_and_find_by_key() {
        let store = MemoryDocumentStore::new();
        let body = to_document(&json!({"name": "Clay Bowl"})).unwrap();
        let key = store.insert(Collection::Product, body.clone()).await.unwrap();

        let found = store.find_by_key(Collection::Product, key).await.unwrap();
        assert_eq!(found, Some(StoredDocument { key, body }));

        // Collections are isolated
        let other = store
            .find_by_key(Collection::ContactMessage, key)
            .await
            .unwrap();
        assert!(other.is_none());
    }

    #[tokio::test]
    async fn test_find_respects_filter_limit_and_order() {
        let store = MemoryDocumentStore::new();
        for (name, kind) in [("a", "mug"), ("b", "bowl"), ("c", "mug"), ("d", "mug")] {
            let body = to_document(&json!({"name": name, "type": kind})).unwrap();
            store.insert(Collection::Product, body).await.unwrap();
        }

        let mugs = store
            .find(Collection::Product, &Filter::new().eq("type", "mug"), 2)
            .await
            .unwrap();
        let names: Vec<_> = mugs.iter().map(|d| d.body["name"].clone()).collect();
        assert_eq!(names, vec![json!("a"), json!("c")]);

        assert_eq!(store.count(Collection::Product).await.unwrap(), 4);
        assert_eq!(store.count(Collection::ContactMessage).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_offline_store_fails_every_operation() {
        let store = MemoryDocumentStore::offline();
        assert!(store.ping().await.is_err());
        assert!(store.count(Collection::Product).await.is_err());
        assert!(
            store
                .find(Collection::Product, &Filter::new(), 10)
                .await
                .is_err()
        );
        assert!(
            store
                .insert(Collection::Product, Document::new())
                .await
                .is_err()
        );

        store.set_online(true);
        assert!(store.ping().await.is_ok());
    }
}
