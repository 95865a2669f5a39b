//! # Cart Service
//!
//! The cart mutation API and the cart/catalog read views.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    add_item(cart_code, product_id)                      │
//! │                                                                         │
//! │  1. validate cart_code, parse product_id   → 400 on failure            │
//! │  2. products.find_by_id                    → ProductNotFound           │
//! │  3. carts.get_or_create(cart_code)         (race-safe insert)          │
//! │  4. cart_items.upsert_increment(+1)        (single statement)          │
//! │  5. carts.touch(cart_code)                                             │
//! │  6. CartLine::resolve(item, product)       → response                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation ends by touching the owning cart.

use serde_json::Value;
use tracing::{debug, info};

use shopit_core::validation::{parse_identifier, parse_quantity, validate_cart_code};
use shopit_core::{
    CartLine, CartStat, CartView, CoreError, Product, ProductDetail, SIMILAR_PRODUCTS_LIMIT,
};
use shopit_db::Database;

use crate::error::ServiceResult;

/// Default page size for the catalog listing.
pub const DEFAULT_PRODUCT_LIMIT: u32 = 50;

/// Largest page the catalog listing will return.
pub const MAX_PRODUCT_LIMIT: u32 = 200;

/// Cart operations over a shared [`Database`] handle.
#[derive(Debug, Clone)]
pub struct CartService {
    db: Database,
}

impl CartService {
    /// Creates a new cart service.
    pub fn new(db: Database) -> Self {
        CartService { db }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of a product to a cart.
    ///
    /// Creates the cart on first use. Adding a product already in the cart
    /// increments its quantity; it never creates a second row.
    pub async fn add_item(&self, cart_code: &str, product_id: &str) -> ServiceResult<CartLine> {
        let cart_code = validate_cart_code(cart_code)?;
        let product_id = parse_identifier("product_id", product_id)?;

        let product = self
            .db
            .products()
            .find_by_id(&product_id)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound(product_id.clone()))?;

        self.db.carts().get_or_create(&cart_code).await?;
        let item = self
            .db
            .cart_items()
            .upsert_increment(&cart_code, &product_id, 1)
            .await?;
        self.db.carts().touch(&cart_code).await?;

        info!(
            cart_code = %cart_code,
            product_id = %product_id,
            quantity = item.quantity,
            "Item added to cart"
        );

        Ok(CartLine::resolve(item, Some(product)))
    }

    /// Sets an item's quantity.
    ///
    /// `quantity` is the raw request value: an integer or a numeric string,
    /// at least 1. Anything else leaves the item untouched.
    pub async fn update_quantity(
        &self,
        item_id: &str,
        quantity: Option<&Value>,
    ) -> ServiceResult<CartLine> {
        let item_id = parse_identifier("item_id", item_id)?;
        let quantity = parse_quantity(quantity)?;

        let items = self.db.cart_items();
        if items.get(&item_id).await?.is_none() {
            return Err(CoreError::ItemNotFound(item_id).into());
        }

        let item = items.set_quantity(&item_id, quantity).await?;
        self.db.carts().touch(&item.cart_code).await?;

        debug!(item_id = %item_id, quantity, "Cart item quantity updated");

        let product = self.db.products().find_by_id(&item.product_id).await?;
        Ok(CartLine::resolve(item, product))
    }

    /// Removes an item from its cart.
    pub async fn remove_item(&self, item_id: &str) -> ServiceResult<()> {
        let item_id = parse_identifier("item_id", item_id)?;

        let removed = self
            .db
            .cart_items()
            .remove(&item_id)
            .await?
            .ok_or_else(|| CoreError::ItemNotFound(item_id.clone()))?;

        self.db.carts().touch(&removed.cart_code).await?;

        debug!(item_id = %item_id, cart_code = %removed.cart_code, "Cart item removed");
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Whether the product is in the active cart for `cart_code`.
    ///
    /// Creates nothing: an unseen cart code is simply `false`.
    pub async fn check_exists(&self, cart_code: &str, product_id: &str) -> ServiceResult<bool> {
        let cart_code = validate_cart_code(cart_code)?;
        let product_id = parse_identifier("product_id", product_id)?;

        if self.db.carts().get_active(&cart_code).await?.is_none() {
            return Ok(false);
        }

        let item = self.db.cart_items().find(&cart_code, &product_id).await?;
        Ok(item.is_some())
    }

    /// Full view of the active cart.
    ///
    /// `CartNotFound` if the code has no unpaid cart.
    pub async fn get_cart(&self, cart_code: &str) -> ServiceResult<CartView> {
        let cart_code = validate_cart_code(cart_code)?;

        let cart = self
            .db
            .carts()
            .get_active(&cart_code)
            .await?
            .ok_or_else(|| CoreError::CartNotFound(cart_code.clone()))?;

        let lines = self.load_lines(&cart_code).await?;
        Ok(CartView::assemble(cart, lines))
    }

    /// Totals for the active cart, creating the cart if absent.
    pub async fn get_cart_stat(&self, cart_code: &str) -> ServiceResult<CartStat> {
        let cart_code = validate_cart_code(cart_code)?;

        let cart = self.db.carts().get_or_create(&cart_code).await?;
        let lines = self.load_lines(&cart_code).await?;

        Ok(CartStat::summarize(&cart, &lines))
    }

    /// Catalog listing. `limit` defaults to 50 and is capped at 200.
    pub async fn list_products(&self, limit: Option<u32>) -> ServiceResult<Vec<Product>> {
        let limit = limit
            .unwrap_or(DEFAULT_PRODUCT_LIMIT)
            .clamp(1, MAX_PRODUCT_LIMIT);

        Ok(self.db.products().list(limit).await?)
    }

    /// A product by slug with up to four products from its category.
    pub async fn product_detail(&self, slug: &str) -> ServiceResult<ProductDetail> {
        let products = self.db.products();

        let product = products
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound(slug.trim().to_string()))?;

        let similar_products = products
            .find_similar(&product, SIMILAR_PRODUCTS_LIMIT)
            .await?;

        Ok(ProductDetail {
            product,
            similar_products,
        })
    }

    async fn load_lines(&self, cart_code: &str) -> ServiceResult<Vec<CartLine>> {
        let rows = self.db.cart_items().list_with_products(cart_code).await?;

        Ok(rows
            .into_iter()
            .map(|(item, product)| CartLine::resolve(item, product))
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
