//! # Domain Types
//!
//! The three stored records the cart logic works with.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Stored Records                                  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Cart       │   │    CartItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │◄┐ │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  slug (unique)  │ │ │  cart_code ◄────┼───┼─ cart_code      │       │
//! │  │  price_cents    │ └─┼─────────────────┼───┼─ product_id     │       │
//! │  │  name, image    │   │  paid           │   │  quantity (≥1)  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity
//! A cart has a storage `id` and a client-supplied `cart_code`. Items point
//! at the cart by **code**, not by id, so a client can use its code before
//! the cart row exists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A catalog product. Read-only from the cart's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// URL handle, unique across the catalog.
    pub slug: String,

    /// Price in cents.
    pub price_cents: i64,

    /// Image path or URL.
    pub image: Option<String>,

    pub description: Option<String>,

    pub category: Option<String>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A shopping cart keyed by a client-supplied code.
///
/// At most one cart per `cart_code` is unpaid at any time; that one is the
/// *active* cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Cart {
    pub id: String,
    pub cart_code: String,
    pub paid: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    /// Bumped after every item mutation.
    #[ts(as = "String")]
    pub modified_at: DateTime<Utc>,
}

// =============================================================================
// Cart Item
// =============================================================================

/// One (cart_code, product_id) row with its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct CartItem {
    pub id: String,
    pub cart_code: String,
    pub product_id: String,
    /// Always >= 1.
    pub quantity: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
