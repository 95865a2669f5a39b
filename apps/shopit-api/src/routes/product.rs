//! Catalog routes: listing and product detail.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use shopit_core::{Product, ProductDetail};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub limit: Option<u32>,
}

/// `GET /products`
pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ProductsQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Query(query) = query?;

    Ok(Json(state.cart.list_products(query.limit).await?))
}

/// `GET /products/{slug}`
pub async fn product_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProductDetail>, ApiError> {
    Ok(Json(state.cart.product_detail(&slug).await?))
}
