//! # Cart Item Repository
//!
//! One row per (cart_code, product_id), carrying the quantity.
//!
//! ## Item State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   absent ──upsert_increment(d)──► present(d)                           │
//! │   present(n) ──upsert_increment(d)──► present(n + d)                   │
//! │   present(n) ──set_quantity(m ≥ 1)──► present(m)                       │
//! │   present(n) ──remove──► absent                                        │
//! │                                                                         │
//! │   set_quantity(0) is rejected, never a removal.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomic Increment
//! `upsert_increment` is a single `INSERT ... ON CONFLICT DO UPDATE`
//! statement against the `(cart_code, product_id)` unique index, so
//! concurrent adds of the same product sum instead of creating duplicates.
//! The update only fires while the sum stays within `MAX_QUANTITY`; past
//! that the row is left as it was and the call fails with `InvalidQuantity`.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use shopit_core::validation::{parse_identifier, validate_cart_code, validate_quantity};
use shopit_core::{CartItem, Product, ValidationError, MAX_QUANTITY};

const ITEM_COLUMNS: &str = "id, cart_code, product_id, quantity, created_at";

/// A cart item LEFT JOINed with its product. Product columns are all NULL
/// when the product has been deleted.
#[derive(Debug, sqlx::FromRow)]
struct ItemWithProductRow {
    id: String,
    cart_code: String,
    product_id: String,
    quantity: i64,
    created_at: DateTime<Utc>,
    p_id: Option<String>,
    p_name: Option<String>,
    p_slug: Option<String>,
    p_price_cents: Option<i64>,
    p_image: Option<String>,
    p_description: Option<String>,
    p_category: Option<String>,
}

impl ItemWithProductRow {
    fn split(self) -> (CartItem, Option<Product>) {
        let product = match (self.p_id, self.p_name, self.p_slug, self.p_price_cents) {
            (Some(id), Some(name), Some(slug), Some(price_cents)) => Some(Product {
                id,
                name,
                slug,
                price_cents,
                image: self.p_image,
                description: self.p_description,
                category: self.p_category,
            }),
            _ => None,
        };

        let item = CartItem {
            id: self.id,
            cart_code: self.cart_code,
            product_id: self.product_id,
            quantity: self.quantity,
            created_at: self.created_at,
        };

        (item, product)
    }
}

/// Repository for cart item database operations.
///
/// ## Usage
/// ```rust,ignore
/// let items = db.cart_items();
///
/// let item = items.upsert_increment("h7Kd9", &product_id, 1).await?;
/// let item = items.set_quantity(&item.id, 3).await?;
/// let rows = items.list_with_products("h7Kd9").await?;
/// ```
#[derive(Debug, Clone)]
pub struct CartItemRepository {
    pool: SqlitePool,
}

impl CartItemRepository {
    /// Creates a new CartItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartItemRepository { pool }
    }

    /// Gets the item for a product in a cart.
    pub async fn find(&self, cart_code: &str, product_id: &str) -> DbResult<Option<CartItem>> {
        let cart_code = validate_cart_code(cart_code)?;
        let product_id = parse_identifier("product_id", product_id)?;

        let item = sqlx::query_as::<_, CartItem>(&format!(
            "SELECT {} FROM cart_items WHERE cart_code = ?1 AND product_id = ?2",
            ITEM_COLUMNS
        ))
        .bind(&cart_code)
        .bind(&product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Gets an item by its ID.
    pub async fn get(&self, item_id: &str) -> DbResult<Option<CartItem>> {
        let item_id = parse_identifier("item_id", item_id)?;

        let item = sqlx::query_as::<_, CartItem>(&format!(
            "SELECT {} FROM cart_items WHERE id = ?1",
            ITEM_COLUMNS
        ))
        .bind(&item_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Adds `delta` to the item's quantity, inserting the row at `delta`
    /// if it doesn't exist yet.
    ///
    /// ## Returns
    /// * `Ok(CartItem)` - The item after the change
    /// * `Err(DbError::Validation)` - delta out of range, or the new
    ///   quantity would exceed `MAX_QUANTITY` (row untouched)
    pub async fn upsert_increment(
        &self,
        cart_code: &str,
        product_id: &str,
        delta: i64,
    ) -> DbResult<CartItem> {
        let cart_code = validate_cart_code(cart_code)?;
        let product_id = parse_identifier("product_id", product_id)?;
        let delta = validate_quantity(delta)?;

        debug!(cart_code = %cart_code, product_id = %product_id, delta, "Incrementing cart item");

        let item = sqlx::query_as::<_, CartItem>(&format!(
            r#"
            INSERT INTO cart_items (id, cart_code, product_id, quantity, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (cart_code, product_id)
            DO UPDATE SET quantity = cart_items.quantity + excluded.quantity
            WHERE cart_items.quantity <= ?6 - excluded.quantity
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(&cart_code)
        .bind(&product_id)
        .bind(delta)
        .bind(Utc::now())
        .bind(MAX_QUANTITY)
        .fetch_optional(&self.pool)
        .await?;

        item.ok_or_else(|| {
            DbError::Validation(ValidationError::invalid_quantity(format!(
                "adding {} would exceed the maximum of {}",
                delta, MAX_QUANTITY
            )))
        })
    }

    /// Sets an item's quantity.
    ///
    /// ## Returns
    /// * `Ok(CartItem)` - The updated item
    /// * `Err(DbError::Validation)` - quantity below 1 (row untouched)
    /// * `Err(DbError::NotFound)` - No such item
    pub async fn set_quantity(&self, item_id: &str, quantity: i64) -> DbResult<CartItem> {
        let item_id = parse_identifier("item_id", item_id)?;
        let quantity = validate_quantity(quantity)?;

        debug!(item_id = %item_id, quantity, "Setting cart item quantity");

        let item = sqlx::query_as::<_, CartItem>(&format!(
            "UPDATE cart_items SET quantity = ?2 WHERE id = ?1 RETURNING {}",
            ITEM_COLUMNS
        ))
        .bind(&item_id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await?;

        item.ok_or_else(|| DbError::not_found("CartItem", item_id))
    }

    /// Deletes an item.
    ///
    /// ## Returns
    /// * `Ok(Some(CartItem))` - The removed row
    /// * `Ok(None)` - No such item
    pub async fn remove(&self, item_id: &str) -> DbResult<Option<CartItem>> {
        let item_id = parse_identifier("item_id", item_id)?;

        debug!(item_id = %item_id, "Removing cart item");

        let item = sqlx::query_as::<_, CartItem>(&format!(
            "DELETE FROM cart_items WHERE id = ?1 RETURNING {}",
            ITEM_COLUMNS
        ))
        .bind(&item_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// All items in a cart, oldest first.
    pub async fn list_for_cart(&self, cart_code: &str) -> DbResult<Vec<CartItem>> {
        let cart_code = validate_cart_code(cart_code)?;

        let items = sqlx::query_as::<_, CartItem>(&format!(
            "SELECT {} FROM cart_items WHERE cart_code = ?1 ORDER BY created_at, id",
            ITEM_COLUMNS
        ))
        .bind(&cart_code)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// All items in a cart with their products, oldest first.
    ///
    /// Items whose product no longer exists come back with `None`.
    pub async fn list_with_products(
        &self,
        cart_code: &str,
    ) -> DbResult<Vec<(CartItem, Option<Product>)>> {
        let cart_code = validate_cart_code(cart_code)?;

        let rows = sqlx::query_as::<_, ItemWithProductRow>(
            r#"
            SELECT
                ci.id,
                ci.cart_code,
                ci.product_id,
                ci.quantity,
                ci.created_at,
                p.id          AS p_id,
                p.name        AS p_name,
                p.slug        AS p_slug,
                p.price_cents AS p_price_cents,
                p.image       AS p_image,
                p.description AS p_description,
                p.category    AS p_category
            FROM cart_items ci
            LEFT JOIN products p ON p.id = ci.product_id
            WHERE ci.cart_code = ?1
            ORDER BY ci.created_at, ci.id
            "#,
        )
        .bind(&cart_code)
        .fetch_all(&self.pool)
        .await?;

        debug!(cart_code = %cart_code, count = rows.len(), "Loaded cart items");
        Ok(rows.into_iter().map(ItemWithProductRow::split).collect())
    }

    /// Gets one item with its product.
    pub async fn get_with_product(
        &self,
        item_id: &str,
    ) -> DbResult<Option<(CartItem, Option<Product>)>> {
        let Some(item) = self.get(item_id).await? else {
            return Ok(None);
        };

        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, slug, price_cents, image, description, category
            FROM products WHERE id = ?1
            "#,
        )
        .bind(&item.product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(Some((item, product)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
