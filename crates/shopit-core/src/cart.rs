//! # Cart Aggregation
//!
//! Turns stored rows into the read views of a cart.
//!
//! ## Aggregation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Building a Cart View                                 │
//! │                                                                         │
//! │  Cart (active)     (CartItem, Option<Product>) rows                    │
//! │       │                        │                                        │
//! │       │                        ▼                                        │
//! │       │            CartLine::resolve ← price × quantity, or 0           │
//! │       │                        │        when the product is gone        │
//! │       │                        ▼                                        │
//! │       │            CartTotals::from_lines                               │
//! │       │              num_of_items = Σ quantity   (every line)           │
//! │       │              sum_total    = Σ line total (priced lines)         │
//! │       │                        │                                        │
//! │       └──────────┬─────────────┘                                        │
//! │                  ▼                                                      │
//! │     CartView::assemble   (full payload)                                 │
//! │     CartStat::summarize  (totals only)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Orphaned Items
//! A cart item whose product was deleted is an expected steady state, not an
//! error. The line keeps its quantity, carries `product: null` and a zero
//! total.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Cart, CartItem, Product};

// =============================================================================
// Cart Line
// =============================================================================

/// A cart item joined with its product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub id: String,
    pub cart_code: String,
    pub product_id: String,
    /// `None` when the product no longer exists.
    pub product: Option<Product>,
    pub quantity: i64,
    /// Unit price × quantity, zero for an orphaned item.
    pub total: Money,
}

impl CartLine {
    /// Joins an item with its (possibly missing) product and prices the line.
    pub fn resolve(item: CartItem, product: Option<Product>) -> Self {
        let total = product
            .as_ref()
            .map(|p| p.price().multiply_quantity(item.quantity))
            .unwrap_or_default();

        CartLine {
            id: item.id,
            cart_code: item.cart_code,
            product_id: item.product_id,
            product,
            quantity: item.quantity,
            total,
        }
    }

    /// Whether the referenced product is gone.
    pub fn is_orphaned(&self) -> bool {
        self.product.is_none()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart-wide aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    /// Sum of raw quantities, orphaned lines included.
    pub num_of_items: i64,
    /// Sum of line totals; orphaned lines add zero.
    pub sum_total: Money,
}

impl CartTotals {
    /// Computes totals over resolved lines.
    pub fn from_lines(lines: &[CartLine]) -> Self {
        lines.iter().fold(CartTotals::default(), |mut acc, line| {
            acc.num_of_items = acc.num_of_items.saturating_add(line.quantity);
            acc.sum_total += line.total;
            acc
        })
    }
}

// =============================================================================
// Cart View
// =============================================================================

/// Full read view of a cart, as returned by `GET /get_cart`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartView {
    pub id: String,
    pub cart_code: String,
    pub paid: bool,
    pub items: Vec<CartLine>,
    pub sum_total: Money,
    pub num_of_items: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub modified_at: DateTime<Utc>,
}

impl CartView {
    /// Assembles the view from the cart record and its resolved lines.
    pub fn assemble(cart: Cart, items: Vec<CartLine>) -> Self {
        let totals = CartTotals::from_lines(&items);

        CartView {
            id: cart.id,
            cart_code: cart.cart_code,
            paid: cart.paid,
            items,
            sum_total: totals.sum_total,
            num_of_items: totals.num_of_items,
            created_at: cart.created_at,
            modified_at: cart.modified_at,
        }
    }
}

// =============================================================================
// Cart Stat
// =============================================================================

/// Lightweight summary used by the storefront's cart badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartStat {
    pub cart_code: String,
    pub total_items: i64,
    pub total_price: Money,
    pub paid: bool,
}

impl CartStat {
    /// Same join-and-sum as [`CartView::assemble`], without the items.
    pub fn summarize(cart: &Cart, lines: &[CartLine]) -> Self {
        let totals = CartTotals::from_lines(lines);

        CartStat {
            cart_code: cart.cart_code.clone(),
            total_items: totals.num_of_items,
            total_price: totals.sum_total,
            paid: cart.paid,
        }
    }
}

// =============================================================================
// Product Detail
// =============================================================================

/// A product with other products from its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub similar_products: Vec<Product>,
}

// =============================================================================
// Unit Tests
// =============================================================================
