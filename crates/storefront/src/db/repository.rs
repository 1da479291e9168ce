//! Generic create/read operations shared by every collection.
//!
//! The repository owns the two storage invariants:
//! - `created_at`/`updated_at` are stamped here at insertion, never by callers
//! - stored keys leave only as the public `id` string (see [`into_public`])

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use uuid::Uuid;

use super::{
    Collection, Document, DocumentStore, Filter, PUBLIC_ID_FIELD, StoreError, into_public,
};

pub const CREATED_AT_FIELD: &str = "created_at";
pub const UPDATED_AT_FIELD: &str = "updated_at";

/// Repository for document store operations.
#[derive(Debug, Clone, Copy)]
pub struct DocumentRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> DocumentRepository<'a> {
    /// Maximum number of records returned by a listing.
    pub const DEFAULT_LIMIT: usize = 100;

    /// Create a new repository over a store.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Insert `data` with fresh timestamps and return it as stored.
    ///
    /// The record is re-read by its assigned key. `Ok(None)` means the insert
    /// went through but the re-read found nothing; callers treat creation as
    /// best-effort.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the insert or the re-read fails.
    pub async fn create(
        &self,
        collection: Collection,
        data: Document,
    ) -> Result<Option<Document>, StoreError> {
        let mut body = data;
        body.remove(PUBLIC_ID_FIELD);
        let now = Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true));
        body.insert(CREATED_AT_FIELD.to_string(), now.clone());
        body.insert(UPDATED_AT_FIELD.to_string(), now);

        let key = self.store.insert(collection, body).await?;
        tracing::debug!(%collection, %key, "document inserted");

        let stored = self.store.find_by_key(collection, key).await?;
        if stored.is_none() {
            tracing::warn!(%collection, %key, "inserted document not found on re-read");
        }
        Ok(stored.map(into_public))
    }

    /// Up to `limit` records matching `filter`, each with its public `id`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn list(
        &self,
        collection: Collection,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        let docs = self.store.find(collection, filter, limit).await?;
        Ok(docs.into_iter().map(into_public).collect())
    }

    /// The record whose public identifier is `id`.
    ///
    /// An `id` that is not a valid key is reported as absent, the same as a
    /// key with no match.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the lookup fails.
    pub async fn get_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let Ok(key) = Uuid::parse_str(id) else {
            tracing::debug!(%collection, id, "not a document key");
            return Ok(None);
        };
        let doc = self.store.find_by_key(collection, key).await?;
        Ok(doc.map(into_public))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::db::{MemoryDocumentStore, StoredDocument, to_document};

    /// Accepts inserts but never finds anything.
    #[derive(Debug)]
    struct WriteOnlyStore;

    #[async_trait]
    impl DocumentStore for WriteOnlyStore {
        async fn insert(&self, _: Collection, _: Document) -> Result<Uuid, StoreError> {
            Ok(Uuid::new_v4())
        }

        async fn find(
            &self,
            _: Collection,
            _: &Filter,
            _: usize,
        ) -> Result<Vec<StoredDocument>, StoreError> {
            Ok(Vec::new())
        }

        async fn find_by_key(
            &self,
            _: Collection,
            _: Uuid,
        ) -> Result<Option<StoredDocument>, StoreError> {
            Ok(None)
        }

        async fn count(&self, _: Collection) -> Result<u64, StoreError> {
            Ok(0)
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn contact() -> Document {
        to_document(&json!({
            "name": "Ada",
            "email": "ada@example.com",
            "message": "Do you ship to Lisbon?"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_then_get_by_id_round_trip() {
        let store = MemoryDocumentStore::new();
        let repo = DocumentRepository::new(&store);

        let created = repo
            .create(Collection::ContactMessage, contact())
            .await
            .unwrap()
            .unwrap();
        let id = created["id"].as_str().unwrap();

        let fetched = repo
            .get_by_id(Collection::ContactMessage, id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched, created);
        for (field, value) in contact() {
            assert_eq!(fetched[&field], value);
        }
    }

    #[tokio::test]
    async fn test_create_stamps_timestamps() {
        let store = MemoryDocumentStore::new();
        let repo = DocumentRepository::new(&store);

        let mut data = contact();
        data.insert("created_at".to_string(), json!("1999-01-01T00:00:00Z"));
        data.insert("id".to_string(), json!("caller-chosen"));

        let created = repo
            .create(Collection::ContactMessage, data)
            .await
            .unwrap()
            .unwrap();

        let created_at = created["created_at"].as_str().unwrap();
        assert_ne!(created_at, "1999-01-01T00:00:00Z");
        assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());
        assert_eq!(created["updated_at"], created["created_at"]);
        assert_ne!(created["id"], json!("caller-chosen"));
    }

    #[tokio::test]
    async fn test_stored_body_has_no_public_id() {
        let store = MemoryDocumentStore::new();
        let repo = DocumentRepository::new(&store);
        repo.create(Collection::Product, contact()).await.unwrap();

        let raw = store
            .find(Collection::Product, &Filter::new(), 10)
            .await
            .unwrap();
        assert_eq!(raw.len(), 1);
        assert!(!raw[0].body.contains_key("id"));
    }

    #[tokio::test]
    async fn test_create_returns_none_when_reread_misses() {
        let repo = DocumentRepository::new(&WriteOnlyStore);
        let created = repo.create(Collection::ContactMessage, contact()).await;
        assert!(matches!(created, Ok(None)));
    }

    #[tokio::test]
    async fn test_list_exposes_public_ids() {
        let store = MemoryDocumentStore::new();
        let repo = DocumentRepository::new(&store);
        for _ in 0..3 {
            repo.create(Collection::Product, contact()).await.unwrap();
        }

        let listed = repo
            .list(Collection::Product, &Filter::new(), 2)
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|doc| doc["id"].is_string()));
    }

    #[tokio::test]
    async fn test_get_by_id_malformed_is_absent() {
        let store = MemoryDocumentStore::new();
        let repo = DocumentRepository::new(&store);
        let found = repo
            .get_by_id(Collection::Product, "not-a-uuid")
            .await
            .unwrap();
        assert!(found.is_none());

        let found = repo
            .get_by_id(Collection::Product, &Uuid::new_v4().to_string())
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_malformed_is_absent_even_when_offline() {
        let store = MemoryDocumentStore::offline();
        let repo = DocumentRepository::new(&store);
        assert!(matches!(
            repo.get_by_id(Collection::Product, "terracotta-mug").await,
            Ok(None)
        ));
        assert!(
            repo.get_by_id(Collection::Product, &Uuid::new_v4().to_string())
                .await
                .is_err()
        );
    }
}
