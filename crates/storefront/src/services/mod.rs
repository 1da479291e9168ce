//! Business logic services for storefront.
//!
//! # Services
//!
//! - `catalog` - Product listing and lookup with fallback to sample data
//! - `seed` - One-shot seeding of the product collection at startup

pub mod catalog;
pub mod seed;

pub use catalog::{FallbackReason, ProductQuery, ProductRecord, Sourced};
