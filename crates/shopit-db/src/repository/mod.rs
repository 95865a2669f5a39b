//! # Repository Module
//!
//! Database repository implementations for ShopIt.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartService                                                           │
//! │       │  db.cart_items().upsert_increment(code, product_id, 1)         │
//! │       ▼                                                                 │
//! │  CartItemRepository                                                    │
//! │  ├── find / get / get_with_product                                     │
//! │  ├── upsert_increment / set_quantity / remove                          │
//! │  └── list_for_cart / list_with_products                                │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every repository validates the ids and cart codes it receives before
//! building a query.
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Catalog lookups
//! - [`CartRepository`](cart::CartRepository) - Active cart per code
//! - [`CartItemRepository`](cart_item::CartItemRepository) - Items and quantities

pub mod cart;
pub mod cart_item;
pub mod product;

#[cfg(test)]
pub(crate) mod fixtures {
    use shopit_core::Product;
    use uuid::Uuid;

    /// A product with a fresh id and a slug derived from the name.
    pub fn sample_product(name: &str, price_cents: i64, category: Option<&str>) -> Product {
        Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            price_cents,
            image: None,
            description: None,
            category: category.map(str::to_string),
        }
    }
}
