//! Cart-add request.

use serde::{Deserialize, Serialize};

use crate::types::validation::ValidationError;

/// A request to add a product to the cart.
///
/// Cart items are never persisted; they are validated and echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Public identifier of the referenced product.
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

const fn default_quantity() -> i64 {
    1
}

impl CartItem {
    pub const MIN_QUANTITY: i64 = 1;
    pub const MAX_QUANTITY: i64 = 10;

    /// Check that the quantity is within `1..=10`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] for any other quantity.
    pub const fn validate(&self) -> Result<(), ValidationError> {
        if self.quantity < Self::MIN_QUANTITY || self.quantity > Self::MAX_QUANTITY {
            return Err(ValidationError::OutOfRange {
                field: "quantity",
                min: Self::MIN_QUANTITY,
                max: Self::MAX_QUANTITY,
            });
        }
        Ok(())
    }
}
