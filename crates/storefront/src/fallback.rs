//! Built-in sample catalog.
//!
//! Served when the store has no matching products or cannot be reached, and
//! used as the seed set for an empty store. Immutable after process start.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use urban_wheel_core::{Product, ProductType};

use crate::db::{Filter, to_document};

/// (name, description, price in cents, image, type)
const SAMPLES: [(&str, &str, i64, &str, ProductType); 6] = [
    (
        "Terracotta Mug",
        "Hand-thrown terracotta mug with matte finish.",
        2800,
        "https://images.unsplash.com/photo-1607301405391-027cb30d2e05?q=80&w=1200&auto=format&fit=crop",
        ProductType::Mug,
    ),
    (
        "Clay Bowl",
        "Warm clay bowl for soups and salads.",
        3600,
        "https://images.unsplash.com/photo-1522770179533-24471fcdba45?q=80&w=1200&auto=format&fit=crop",
        ProductType::Bowl,
    ),
    (
        "Olive Plate",
        "Muted olive glazed dinner plate.",
        2400,
        "https://images.unsplash.com/photo-1556740738-b6a63e27c4df?q=80&w=1200&auto=format&fit=crop",
        ProductType::Plate,
    ),
    (
        "Minimal Vase",
        "Tall vase inspired by modern craftsmanship.",
        5800,
        "https://images.unsplash.com/photo-1556228453-efd1f4e3f7d5?q=80&w=1200&auto=format&fit=crop",
        ProductType::Vase,
    ),
    (
        "Beige Cup",
        "Small cup with warm beige glaze.",
        1800,
        "https://images.unsplash.com/photo-1563205570-03bfb1c006a1?q=80&w=1200&auto=format&fit=crop",
        ProductType::Mug,
    ),
    (
        "Textured Bowl",
        "Hand-textured bowl, perfect for noodles.",
        4200,
        "https://images.unsplash.com/photo-1543168256-418811576931?q=80&w=1200&auto=format&fit=crop",
        ProductType::Bowl,
    ),
];

static CATALOG: LazyLock<Vec<Product>> = LazyLock::new(|| {
    SAMPLES
        .iter()
        .map(|&(name, description, cents, image, product_type)| Product {
            name: name.to_string(),
            description: description.to_string(),
            price: Decimal::new(cents, 2),
            image: image.to_string(),
            product_type,
            in_stock: true,
        })
        .collect()
});

/// The full sample catalog, in fixed order.
#[must_use]
pub fn sample_products() -> &'static [Product] {
    &CATALOG
}

/// Sample products matching `filter`, with the same semantics the store
/// applies to stored documents.
#[must_use]
pub fn products(filter: &Filter) -> Vec<Product> {
    CATALOG
        .iter()
        .filter(|product| to_document(product).is_ok_and(|doc| filter.matches(&doc)))
        .cloned()
        .collect()
}

/// The sample product whose slug equals `id`, compared case-insensitively.
#[must_use]
pub fn find_by_slug(id: &str) -> Option<Product> {
    let wanted = id.to_lowercase();
    CATALOG
        .iter()
        .find(|product| product.slug() == wanted)
        .cloned()
}
