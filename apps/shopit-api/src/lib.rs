//! # ShopIt API
//!
//! HTTP server for the storefront cart.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         ShopIt API                                      │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  routes::cart  │  │ routes::product│  │  routes::health            ││
//! │  │                │  │                │  │                            ││
//! │  │ • add_item     │  │ • /products    │  │ • /health                  ││
//! │  │ • get_cart     │  │ • /products/   │  │                            ││
//! │  │ • get_cart_stat│  │     {slug}     │  │                            ││
//! │  │ • update_qty   │  │                │  │                            ││
//! │  │ • remove_item  │  │                │  │                            ││
//! │  └───────┬────────┘  └───────┬────────┘  └─────────────┬──────────────┘│
//! │          └──────────┬────────┘                         │               │
//! │                     ▼                                  │               │
//! │            services::CartService                       │               │
//! │                     │                                  │               │
//! │                     ▼                                  ▼               │
//! │              shopit_db::Database (SQLite pool)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables (a `.env` file is read first if present):
//! - `SHOPIT_HOST` - bind host (default: 0.0.0.0)
//! - `SHOPIT_PORT` - HTTP port (default: 8001)
//! - `SHOPIT_DATABASE_PATH` - SQLite file (default: ./shopit.db)
//! - `SHOPIT_DB_MAX_CONNECTIONS` - pool size (default: 5)
//! - `SHOPIT_CORS_PERMISSIVE` - allow any origin (default: true)
//! - `RUST_LOG` - log filter (default: info,shopit_api=debug)

pub mod config;
pub mod error;
pub mod routes;
pub mod services;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ServiceError};
pub use routes::router;
pub use services::CartService;

use shopit_db::Database;

/// Shared application state, cloned into every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub cart: CartService,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState {
            cart: CartService::new(db.clone()),
            db,
        }
    }
}
