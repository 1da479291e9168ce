//! Cart route handlers.
//!
//! The cart is not persisted: adding an item validates it and echoes it back.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;
use tracing::instrument;
use urban_wheel_core::CartItem;

use crate::error::Result;
use crate::services::catalog::{self, ProductRecord};
use crate::state::AppState;

/// The echoed cart line.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CartLine {
    /// The referenced product was found in the store.
    Product {
        product: ProductRecord,
        quantity: i64,
    },
    /// The product could not be resolved; only the request is echoed.
    Reference { product_id: String, quantity: i64 },
}

/// Response for add-to-cart.
#[derive(Debug, Serialize)]
pub struct CartAddResponse {
    pub success: bool,
    pub item: CartLine,
}

/// Add an item to the cart.
///
/// POST /cart/add
///
/// Never fails for a valid item: if the product can't be resolved the
/// response echoes the request instead.
#[instrument(skip_all)]
pub async fn add(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CartItem>, JsonRejection>,
) -> Result<Json<CartAddResponse>> {
    let Json(item) = payload?;
    item.validate()?;

    let product = catalog::lookup_product(state.repository(), &item.product_id).await;
    let line = match product {
        Some(product) => CartLine::Product {
            product,
            quantity: item.quantity,
        },
        None => {
            tracing::debug!(product_id = %item.product_id, "echoing unresolved cart item");
            CartLine::Reference {
                product_id: item.product_id,
                quantity: item.quantity,
            }
        }
    };

    Ok(Json(CartAddResponse {
        success: true,
        item: line,
    }))
}
