//! Service layer between the HTTP routes and the repositories.

pub mod cart_service;

pub use cart_service::CartService;
