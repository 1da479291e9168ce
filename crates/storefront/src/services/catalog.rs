//! Product catalog reads with fallback to the built-in samples.
//!
//! Every read is a two-branch strategy made explicit by [`Sourced`]: the
//! store's answer when it has one, otherwise the sample catalog. An empty
//! result and a failed query both fall back; the branch records which of the
//! two happened.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use urban_wheel_core::Product;

use crate::db::{
    Collection, Document, DocumentRepository, Filter, PUBLIC_ID_FIELD, StoreError,
    repository::{CREATED_AT_FIELD, UPDATED_AT_FIELD},
};
use crate::error::add_breadcrumb;
use crate::fallback;

/// Why a read was answered from the sample catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The store answered but had nothing usable.
    Empty,
    /// The store query failed.
    Unavailable,
}

impl FallbackReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Unavailable => "unavailable",
        }
    }
}

/// A value together with the source that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Sourced<T> {
    /// Answered by the document store.
    Primary(T),
    /// Answered by the sample catalog.
    Fallback { value: T, reason: FallbackReason },
}

impl<T> Sourced<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Primary(value) | Self::Fallback { value, .. } => value,
        }
    }

    #[must_use]
    pub const fn fallback_reason(&self) -> Option<FallbackReason> {
        match self {
            Self::Primary(_) => None,
            Self::Fallback { reason, .. } => Some(*reason),
        }
    }
}

/// Optional product listing criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub product_type: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl ProductQuery {
    /// Type equality if a non-empty type is given, plus one price range
    /// clause if either bound is given.
    #[must_use]
    pub fn to_filter(&self) -> Filter {
        let mut filter = Filter::new();
        if let Some(product_type) = self.product_type.as_deref().filter(|t| !t.is_empty()) {
            filter = filter.eq("type", product_type);
        }
        filter.range("price", self.min_price, self.max_price)
    }
}

/// A product as returned by the API.
///
/// Store-sourced products carry their public `id` and timestamps; sample
/// products carry neither.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub product: Product,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ProductRecord {
    /// Decode a public document (one that went through the repository).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialization` if the document is not a product
    /// and `StoreError::InvalidDocument` if it breaks a product constraint.
    pub fn from_document(doc: Document) -> Result<Self, StoreError> {
        let text = |field: &str| doc.get(field).and_then(Value::as_str).map(str::to_owned);
        let id = text(PUBLIC_ID_FIELD);
        let created_at = text(CREATED_AT_FIELD);
        let updated_at = text(UPDATED_AT_FIELD);
        let product: Product = serde_json::from_value(Value::Object(doc))?;
        product
            .validate()
            .map_err(|e| StoreError::InvalidDocument(e.to_string()))?;

        Ok(Self {
            id,
            product,
            created_at,
            updated_at,
        })
    }
}

impl From<Product> for ProductRecord {
    fn from(product: Product) -> Self {
        Self {
            id: None,
            product,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Decode documents into products, skipping any that don't fit the shape.
fn decode_products(docs: Vec<Document>) -> Vec<ProductRecord> {
    docs.into_iter()
        .filter_map(|doc| {
            let id = doc.get(PUBLIC_ID_FIELD).cloned();
            ProductRecord::from_document(doc)
                .inspect_err(|e| tracing::warn!(?id, error = %e, "skipping malformed product"))
                .ok()
        })
        .collect()
}

fn note_fallback(reason: FallbackReason, operation: &str) {
    add_breadcrumb(
        "catalog",
        "Serving sample products",
        Some(&[("reason", reason.as_str()), ("operation", operation)]),
    );
}

/// List products matching `query`, at most [`DocumentRepository::DEFAULT_LIMIT`].
///
/// Falls back to the sample catalog, filtered the same way, when the store
/// returns no products or fails.
pub async fn list_products(
    repo: DocumentRepository<'_>,
    query: &ProductQuery,
) -> Sourced<Vec<ProductRecord>> {
    let filter = query.to_filter();

    let reason = match repo
        .list(Collection::Product, &filter, DocumentRepository::DEFAULT_LIMIT)
        .await
    {
        Ok(docs) => {
            let products = decode_products(docs);
            if !products.is_empty() {
                return Sourced::Primary(products);
            }
            tracing::info!(?query, "no stored products matched, using samples");
            FallbackReason::Empty
        }
        Err(e) => {
            tracing::warn!(error = %e, ?query, "product listing failed, using samples");
            FallbackReason::Unavailable
        }
    };

    note_fallback(reason, "list");
    Sourced::Fallback {
        value: fallback::products(&filter)
            .into_iter()
            .map(ProductRecord::from)
            .collect(),
        reason,
    }
}

/// Find a product by public identifier, or by sample slug when the store
/// has no such product or fails.
///
/// Returns `None` only when neither source knows the identifier.
pub async fn find_product(repo: DocumentRepository<'_>, id: &str) -> Option<Sourced<ProductRecord>> {
    let reason = match lookup(repo, id).await {
        Ok(Some(record)) => return Some(Sourced::Primary(record)),
        Ok(None) => FallbackReason::Empty,
        Err(e) => {
            tracing::warn!(error = %e, id, "product lookup failed, trying samples");
            FallbackReason::Unavailable
        }
    };

    let product = fallback::find_by_slug(id)?;
    note_fallback(reason, "show");
    Some(Sourced::Fallback {
        value: product.into(),
        reason,
    })
}

/// Look a product up in the store only.
///
/// Absent products and store failures both yield `None`; failures are logged.
pub async fn lookup_product(repo: DocumentRepository<'_>, id: &str) -> Option<ProductRecord> {
    match lookup(repo, id).await {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(error = %e, id, "product lookup failed");
            None
        }
    }
}

async fn lookup(repo: DocumentRepository<'_>, id: &str) -> Result<Option<ProductRecord>, StoreError> {
    repo.get_by_id(Collection::Product, id)
        .await?
        .map(ProductRecord::from_document)
        .transpose()
}
