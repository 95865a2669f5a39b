//! # Seed Catalog
//!
//! Populates the database with the sample storefront catalog.
//!
//! ## Usage
//! ```bash
//! cargo run -p shopit-db --bin seed
//!
//! # Specify database path
//! cargo run -p shopit-db --bin seed -- --db ./data/shopit.db
//! ```
//!
//! Does nothing if the catalog already has products.

use shopit_core::Product;
use shopit_db::{Database, DbConfig};
use std::env;
use uuid::Uuid;

/// (name, slug, price in dollars, image, description, category)
const CATALOG: &[(&str, &str, i64, &str, &str, &str)] = &[
    (
        "Sample Laptop",
        "sample-laptop",
        1200,
        "/img/Laptop.png",
        "A high-quality sample laptop.",
        "Electronics",
    ),
    (
        "Rolex Watch",
        "rolex-watch",
        5000,
        "/img/rolexwatch_FLUFlPz.jpg",
        "A luxury Rolex watch.",
        "Accessories",
    ),
    (
        "Noise Cancelling Headphones",
        "noise-cancelling-headphones",
        250,
        "/img/headphones.png",
        "Over-ear headphones with active noise cancelling.",
        "Electronics",
    ),
    (
        "Smartphone",
        "smartphone",
        800,
        "/img/smartphone.png",
        "A 6.1 inch smartphone with a dual camera.",
        "Electronics",
    ),
    (
        "Leather Wallet",
        "leather-wallet",
        45,
        "/img/wallet.png",
        "A slim bifold wallet in full-grain leather.",
        "Accessories",
    ),
    (
        "Denim Jacket",
        "denim-jacket",
        90,
        "/img/denim-jacket.png",
        "A classic washed denim jacket.",
        "Clothing",
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./shopit.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("ShopIt Catalog Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./shopit.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 ShopIt Catalog Seeder");
    println!("========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    let mut inserted = 0;
    for &(name, slug, dollars, image, description, category) in CATALOG {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
            price_cents: dollars * 100,
            image: Some(image.to_string()),
            description: Some(description.to_string()),
            category: Some(category.to_string()),
        };

        match db.products().insert(&product).await {
            Ok(stored) => {
                println!("  + {} ({})", stored.name, stored.price());
                inserted += 1;
            }
            Err(e) => eprintln!("Failed to insert {}: {}", slug, e),
        }
    }

    println!();
    println!("✓ Inserted {} products", inserted);

    db.close().await;
    Ok(())
}
