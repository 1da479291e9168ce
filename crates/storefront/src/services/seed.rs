//! Startup seeding of the product collection.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::db::{Collection, DocumentRepository, DocumentStore, StoreError, to_document};
use crate::fallback;

/// Prepare the store and insert the sample products if the product
/// collection is empty.
///
/// Returns the number of products inserted (zero if the collection already
/// had products).
///
/// # Errors
///
/// Returns `StoreError` on the first failing store operation; products
/// inserted before the failure stay inserted.
pub async fn seed_products(store: &dyn DocumentStore) -> Result<usize, StoreError> {
    store.prepare().await?;

    let existing = store.count(Collection::Product).await?;
    if existing > 0 {
        tracing::debug!(existing, "product collection already populated");
        return Ok(0);
    }

    let repo = DocumentRepository::new(store);
    let mut inserted = 0;
    for product in fallback::sample_products() {
        repo.create(Collection::Product, to_document(product)?)
            .await?;
        inserted += 1;
    }
    Ok(inserted)
}

/// Run [`seed_products`] once in the background.
///
/// Fire-and-forget: failures are logged and never retried.
pub fn spawn_seed(store: Arc<dyn DocumentStore>) -> JoinHandle<()> {
    tokio::spawn(async move {
        match seed_products(store.as_ref()).await {
            Ok(0) => {}
            Ok(inserted) => tracing::info!(inserted, "seeded sample products"),
            Err(e) => tracing::warn!(error = %e, "seeding skipped, store unavailable"),
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::{Filter, MemoryDocumentStore};

    #[tokio::test]
    async fn test_seeds_empty_store_once() {
        let store = MemoryDocumentStore::new();
        assert_eq!(seed_products(&store).await.unwrap(), 6);
        assert_eq!(seed_products(&store).await.unwrap(), 0);
        assert_eq!(store.count(Collection::Product).await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_seeded_records_carry_timestamps() {
        let store = MemoryDocumentStore::new();
        seed_products(&store).await.unwrap();

        let docs = store
            .find(Collection::Product, &Filter::new(), 10)
            .await
            .unwrap();
        assert!(docs.iter().all(|doc| doc.body.contains_key("created_at")
            && doc.body.contains_key("updated_at")));
    }

    #[tokio::test]
    async fn test_offline_store_is_reported() {
        let store = MemoryDocumentStore::offline();
        assert!(seed_products(&store).await.is_err());
    }

    #[tokio::test]
    async fn test_spawned_seed_swallows_failures() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::offline());
        spawn_seed(store).await.unwrap();
    }
}
