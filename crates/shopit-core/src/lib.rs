//! # shopit-core: Pure Cart Logic for ShopIt
//!
//! Everything the cart service decides without touching storage: record
//! types, integer money, input validation, the error taxonomy and the cart
//! aggregation engine.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ShopIt Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    shopit-api (axum)                            │   │
//! │  │   add_item, update_quantity, remove_cart_item, get_cart, ...    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopit-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ CartView  │  │  uuid     │  │   │
//! │  │   │  Cart     │  │           │  │ CartStat  │  │  quantity │  │   │
//! │  │   │  CartItem │  │           │  │ CartLine  │  │  cart_code│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    shopit-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Stored records (Product, Cart, CartItem)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - Aggregation engine (line totals, cart totals, views)
//! - [`error`] - Error taxonomy
//! - [`validation`] - Identifier, cart code and quantity rules
//!
//! ## Example Usage
//!
//! ```rust
//! use shopit_core::money::Money;
//!
//! let price = Money::from_cents(1000); // $10.00
//! let line_total = price.multiply_quantity(2);
//! assert_eq!(line_total.cents(), 2000);
//! ```

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartLine, CartStat, CartTotals, CartView, ProductDetail};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a client-supplied cart code.
pub const MAX_CART_CODE_LEN: usize = 100;

/// Largest quantity a single cart item may hold.
///
/// Mirrored by the `cart_items.quantity` CHECK constraint. Keeps
/// `quantity + delta` and `price_cents * quantity` inside `i64`.
pub const MAX_QUANTITY: i64 = 1_000_000_000;

/// Number of "similar products" returned with a product detail.
pub const SIMILAR_PRODUCTS_LIMIT: u32 = 4;
