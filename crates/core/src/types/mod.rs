//! Record types for the storefront.
//!
//! Wire shapes are plain serde structs; constraints are checked by each
//! type's `validate` method so handlers can reject bad input before it
//! reaches the store.

pub mod cart;
pub mod contact;
pub mod email;
pub mod product;
pub mod validation;

pub use cart::CartItem;
pub use contact::ContactMessage;
pub use email::{Email, EmailError};
pub use product::{Product, ProductType};
pub use validation::ValidationError;
