//! Document store access for the storefront.
//!
//! # Collections
//!
//! - `product` - Catalog entries, written only by startup seeding
//! - `contactmessage` - Contact form submissions, never read back
//!
//! # Layers
//!
//! - [`DocumentStore`] - driver seam: insert, filtered find, lookup by key
//! - [`DocumentRepository`] - create/list/get-by-id with timestamps and the
//!   public `id` field, shared by every collection
//!
//! Two stores implement the seam: [`PgDocumentStore`] keeps documents as
//! JSONB rows in `PostgreSQL`, [`MemoryDocumentStore`] keeps them in process.

pub mod filter;
pub mod memory;
pub mod postgres;
pub mod repository;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::config::{StoreBackend, StorefrontConfig};

pub use filter::{Clause, Filter};
pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;
pub use repository::DocumentRepository;

/// A schema-flexible record body.
pub type Document = Map<String, Value>;

/// Name of the field carrying the public identifier.
pub const PUBLIC_ID_FIELD: &str = "id";

/// Named document collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Product,
    ContactMessage,
}

impl Collection {
    /// The collection name as stored.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::ContactMessage => "contactmessage",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A document as the store holds it: native key plus body.
///
/// Never leaves the db module as-is; see [`into_public`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub key: Uuid,
    pub body: Document,
}

/// Rename the store's native key to the public `id` string field.
///
/// This is the only place a stored document is turned into an outward-facing
/// record.
#[must_use]
pub fn into_public(doc: StoredDocument) -> Document {
    let mut body = doc.body;
    body.insert(
        PUBLIC_ID_FIELD.to_string(),
        Value::String(doc.key.to_string()),
    );
    body
}

/// Serialize a record into a document body.
///
/// # Errors
///
/// Returns `StoreError::Serialization` if the record fails to serialize and
/// `StoreError::InvalidDocument` if it is not a JSON object.
pub fn to_document<T: Serialize>(record: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidDocument(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

/// Errors raised by document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database driver reported an error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A document does not have the expected shape.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// The store cannot be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Driver seam over a document database.
///
/// Implementations must be safe for concurrent use by many in-flight requests.
#[async_trait]
pub trait DocumentStore: Send + Sync + fmt::Debug {
    /// Make the backing storage ready (create tables, connect).
    async fn prepare(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Insert a body and return the key the store assigned to it.
    async fn insert(&self, collection: Collection, body: Document) -> Result<Uuid, StoreError>;

    /// Up to `limit` documents matching `filter`, in the store's natural order.
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<StoredDocument>, StoreError>;

    /// The document stored under `key`, if any.
    async fn find_by_key(
        &self,
        collection: Collection,
        key: Uuid,
    ) -> Result<Option<StoredDocument>, StoreError>;

    /// Number of documents in a collection.
    async fn count(&self, collection: Collection) -> Result<u64, StoreError>;

    /// Round-trip to the store to check it is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Build the document store selected by configuration.
///
/// The `PostgreSQL` pool connects lazily, so this succeeds even when the
/// database is down.
///
/// # Errors
///
/// Returns `StoreError::Database` if the database URL cannot be parsed.
pub fn connect(config: &StorefrontConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    match config.store_backend() {
        StoreBackend::Memory => Ok(Arc::new(MemoryDocumentStore::new())),
        StoreBackend::Postgres => Ok(Arc::new(PgDocumentStore::connect_lazy(
            config.database_url.expose_secret(),
            &config.database_name,
        )?)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::Product.name(), "product");
        assert_eq!(Collection::ContactMessage.to_string(), "contactmessage");
    }

    #[test]
    fn test_into_public_renames_key() {
        let key = Uuid::new_v4();
        let body = to_document(&json!({"name": "Clay Bowl"})).unwrap();
        let public = into_public(StoredDocument { key, body });

        assert_eq!(public["id"], json!(key.to_string()));
        assert_eq!(public["name"], json!("Clay Bowl"));
        assert_eq!(public.len(), 2);
    }

    #[test]
    fn test_to_document_rejects_non_objects() {
        assert!(matches!(
            to_document(&json!([1, 2, 3])),
            Err(StoreError::InvalidDocument(_))
        ));
    }
}
