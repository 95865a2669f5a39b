//! # HTTP Routes
//!
//! Route table for the storefront API. Paths match what the storefront
//! already calls.

pub mod cart;
pub mod health;
pub mod product;

use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Builds the application router.
///
/// `cors_permissive` allows any origin, for a storefront served from a
/// different port during development.
pub fn router(state: AppState, cors_permissive: bool) -> Router {
    let router = Router::new()
        .route("/health", get(health::health))
        .route("/products", get(product::list_products))
        .route("/products/{slug}", get(product::product_detail))
        .route("/add_item", post(cart::add_item))
        .route("/product_in_cart", get(cart::product_in_cart))
        .route("/get_cart_stat", get(cart::get_cart_stat))
        .route("/get_cart", get(cart::get_cart))
        .route("/update_quantity", patch(cart::update_quantity))
        .route("/remove_cart_item", delete(cart::remove_cart_item))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
