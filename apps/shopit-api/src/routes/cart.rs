//! # Cart Routes
//!
//! HTTP handlers for the storefront cart.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST   /add_item          {cart_code, product_id}  → 201 {item, message}
//! │  GET    /product_in_cart   ?cart_code&product_id    → {exists}         │
//! │  GET    /get_cart_stat     ?cart_code               → CartStat         │
//! │  GET    /get_cart          ?cart_code               → CartView         │
//! │  PATCH  /update_quantity   {item_id, quantity}      → {item, message}  │
//! │  DELETE /remove_cart_item  {item_id}                → {message}        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Request fields are all optional at the extractor level so that an
//! absent field is reported as `MISSING_FIELD` instead of a generic body
//! rejection.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use shopit_core::validation::require_field;
use shopit_core::{CartLine, CartStat, CartView};

use crate::error::ApiError;
use crate::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub cart_code: Option<String>,
    pub product_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub item_id: Option<String>,
    /// Number or numeric string
    pub quantity: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveItemRequest {
    pub item_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CartQuery {
    pub cart_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProductInCartQuery {
    pub cart_code: Option<String>,
    pub product_id: Option<String>,
}

/// A cart line plus a confirmation message.
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub item: CartLine,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

// =============================================================================
// Handlers
// =============================================================================

/// `POST /add_item`
pub async fn add_item(
    State(state): State<AppState>,
    payload: Result<Json<AddItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let Json(body) = payload?;
    let cart_code = require_field("cart_code", body.cart_code.as_deref())?;
    let product_id = require_field("product_id", body.product_id.as_deref())?;

    debug!(cart_code = %cart_code, product_id = %product_id, "add_item");

    let item = state.cart.add_item(cart_code, product_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ItemResponse {
            item,
            message: "Item added to cart successfully",
        }),
    ))
}

/// `GET /product_in_cart`
pub async fn product_in_cart(
    State(state): State<AppState>,
    query: Result<Query<ProductInCartQuery>, QueryRejection>,
) -> Result<Json<ExistsResponse>, ApiError> {
    let Query(query) = query?;
    let cart_code = require_field("cart_code", query.cart_code.as_deref())?;
    let product_id = require_field("product_id", query.product_id.as_deref())?;

    let exists = state.cart.check_exists(cart_code, product_id).await?;

    Ok(Json(ExistsResponse { exists }))
}

/// `GET /get_cart_stat`
pub async fn get_cart_stat(
    State(state): State<AppState>,
    query: Result<Query<CartQuery>, QueryRejection>,
) -> Result<Json<CartStat>, ApiError> {
    let Query(query) = query?;
    let cart_code = require_field("cart_code", query.cart_code.as_deref())?;

    Ok(Json(state.cart.get_cart_stat(cart_code).await?))
}

/// `GET /get_cart`
pub async fn get_cart(
    State(state): State<AppState>,
    query: Result<Query<CartQuery>, QueryRejection>,
) -> Result<Json<CartView>, ApiError> {
    let Query(query) = query?;
    let cart_code = require_field("cart_code", query.cart_code.as_deref())?;

    Ok(Json(state.cart.get_cart(cart_code).await?))
}

/// `PATCH /update_quantity`
pub async fn update_quantity(
    State(state): State<AppState>,
    payload: Result<Json<UpdateQuantityRequest>, JsonRejection>,
) -> Result<Json<ItemResponse>, ApiError> {
    let Json(body) = payload?;
    let item_id = require_field("item_id", body.item_id.as_deref())?;

    debug!(item_id = %item_id, "update_quantity");

    let item = state
        .cart
        .update_quantity(item_id, body.quantity.as_ref())
        .await?;

    Ok(Json(ItemResponse {
        item,
        message: "Cart item updated successfully",
    }))
}

/// `DELETE /remove_cart_item`
pub async fn remove_cart_item(
    State(state): State<AppState>,
    payload: Result<Json<RemoveItemRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(body) = payload?;
    let item_id = require_field("item_id", body.item_id.as_deref())?;

    state.cart.remove_item(item_id).await?;

    Ok(Json(MessageResponse {
        message: "Cart item removed successfully",
    }))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::routes::test_support::{seed_product, send, test_app};

    #[tokio::test]
    async fn test_add_then_get_cart() {
        let (app, db) = test_app().await;
        let product_id = seed_product(&db, "Sample Laptop", 120_000).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/add_item",
            Some(json!({"cart_code": "h7Kd9", "product_id": product_id})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Item added to cart successfully");
        assert_eq!(body["item"]["quantity"], 1);
        assert_eq!(body["item"]["product"]["name"], "Sample Laptop");

        send(
            &app,
            Method::POST,
            "/add_item",
            Some(json!({"cart_code": "h7Kd9", "product_id": product_id})),
        )
        .await;

        let (status, cart) = send(&app, Method::GET, "/get_cart?cart_code=h7Kd9", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cart["cart_code"], "h7Kd9");
        assert_eq!(cart["paid"], false);
        assert_eq!(cart["items"].as_array().unwrap().len(), 1);
        assert_eq!(cart["items"][0]["quantity"], 2);
        assert_eq!(cart["items"][0]["total"], 240_000);
        assert_eq!(cart["sum_total"], 240_000);
        assert_eq!(cart["num_of_items"], 2);
    }

    #[tokio::test]
    async fn test_add_item_errors() {
        let (app, _) = test_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/add_item",
            Some(json!({"product_id": "550e8400-e29b-41d4-a716-446655440000"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MISSING_FIELD");

        let (status, body) = send(
            &app,
            Method::POST,
            "/add_item",
            Some(json!({"cart_code": "abc", "product_id": "42"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_IDENTIFIER");

        let (status, body) = send(
            &app,
            Method::POST,
            "/add_item",
            Some(json!({"cart_code": "abc", "product_id": "550e8400-e29b-41d4-a716-446655440000"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "PRODUCT_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_product_in_cart() {
        let (app, db) = test_app().await;
        let product_id = seed_product(&db, "Rolex Watch", 500_000).await;
        let uri = format!("/product_in_cart?cart_code=abc&product_id={}", product_id);

        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["exists"], false);

        send(
            &app,
            Method::POST,
            "/add_item",
            Some(json!({"cart_code": "abc", "product_id": product_id})),
        )
        .await;

        let (_, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(body["exists"], true);

        let (status, body) = send(&app, Method::GET, "/product_in_cart?cart_code=abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MISSING_FIELD");
    }

    #[tokio::test]
    async fn test_get_cart_stat_and_missing_cart() {
        let (app, _) = test_app().await;

        let (status, body) = send(&app, Method::GET, "/get_cart?cart_code=nobody", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "CART_NOT_FOUND");

        let (status, stat) = send(&app, Method::GET, "/get_cart_stat?cart_code=nobody", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stat["cart_code"], "nobody");
        assert_eq!(stat["total_items"], 0);
        assert_eq!(stat["total_price"], 0);
        assert_eq!(stat["paid"], false);

        let (status, _) = send(&app, Method::GET, "/get_cart?cart_code=nobody", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::GET, "/get_cart", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MISSING_FIELD");
    }

    #[tokio::test]
    async fn test_update_quantity() {
        let (app, db) = test_app().await;
        let product_id = seed_product(&db, "Sample Laptop", 1000).await;

        let (_, added) = send(
            &app,
            Method::POST,
            "/add_item",
            Some(json!({"cart_code": "abc", "product_id": product_id})),
        )
        .await;
        let item_id = added["item"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/update_quantity",
            Some(json!({"item_id": item_id, "quantity": "3"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Cart item updated successfully");
        assert_eq!(body["item"]["quantity"], 3);
        assert_eq!(body["item"]["total"], 3000);

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/update_quantity",
            Some(json!({"item_id": item_id, "quantity": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_QUANTITY");

        let (_, cart) = send(&app, Method::GET, "/get_cart?cart_code=abc", None).await;
        assert_eq!(cart["items"][0]["quantity"], 3);

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/update_quantity",
            Some(json!({"item_id": "550e8400-e29b-41d4-a716-446655440000", "quantity": 2})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "ITEM_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_remove_cart_item() {
        let (app, db) = test_app().await;
        let product_id = seed_product(&db, "Sample Laptop", 1000).await;

        let (_, added) = send(
            &app,
            Method::POST,
            "/add_item",
            Some(json!({"cart_code": "abc", "product_id": product_id})),
        )
        .await;
        let item_id = added["item"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::DELETE,
            "/remove_cart_item",
            Some(json!({"item_id": item_id})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Cart item removed successfully");

        let (_, cart) = send(&app, Method::GET, "/get_cart?cart_code=abc", None).await;
        assert!(cart["items"].as_array().unwrap().is_empty());

        let (status, body) = send(
            &app,
            Method::DELETE,
            "/remove_cart_item",
            Some(json!({"item_id": item_id})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "ITEM_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_unreadable_body() {
        let (app, _) = test_app().await;

        let (status, body) = send(&app, Method::POST, "/add_item", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_quantity_ceiling_keeps_cart_readable() {
        let (app, db) = test_app().await;
        let product_id = seed_product(&db, "Sample Laptop", 100).await;
        let add = json!({"cart_code": "abc", "product_id": product_id});

        let (_, added) = send(&app, Method::POST, "/add_item", Some(add.clone())).await;
        let item_id = added["item"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/update_quantity",
            Some(json!({"item_id": item_id, "quantity": i64::MAX})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_QUANTITY");

        let (status, _) = send(
            &app,
            Method::PATCH,
            "/update_quantity",
            Some(json!({"item_id": item_id, "quantity": 1_000_000_000})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::POST, "/add_item", Some(add)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_QUANTITY");

        let (status, cart) = send(&app, Method::GET, "/get_cart?cart_code=abc", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cart["items"][0]["quantity"], 1_000_000_000);

        let (status, stat) = send(&app, Method::GET, "/get_cart_stat?cart_code=abc", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stat["total_items"], 1_000_000_000);
    }
}
