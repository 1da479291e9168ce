//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::catalog::{self, ProductQuery, ProductRecord};
use crate::state::AppState;

/// Product listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl From<ListProductsQuery> for ProductQuery {
    fn from(query: ListProductsQuery) -> Self {
        Self {
            product_type: query.product_type,
            min_price: query.min_price,
            max_price: query.max_price,
        }
    }
}

/// List products.
///
/// GET /products?type=&min_price=&max_price=
///
/// Answered from the sample catalog when the store has no matching products
/// or cannot be reached.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    query: std::result::Result<Query<ListProductsQuery>, QueryRejection>,
) -> Result<Json<Vec<ProductRecord>>> {
    let Query(query) = query?;
    let products = catalog::list_products(state.repository(), &query.into()).await;
    Ok(Json(products.into_inner()))
}

/// Show one product.
///
/// GET /products/{id}
///
/// `id` is a store identifier or, for sample products, a name slug such as
/// `minimal-vase`.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductRecord>> {
    catalog::find_product(state.repository(), &id)
        .await
        .map(|product| Json(product.into_inner()))
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
}
