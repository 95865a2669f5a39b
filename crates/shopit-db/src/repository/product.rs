//! # Product Repository
//!
//! Read access to the catalog, plus the handful of writes needed for
//! seeding.
//!
//! ## Key Operations
//! - Lookup by id or slug
//! - Catalog listing and same-category "similar products"
//! - Insert / delete (seed binary and tests)

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use shopit_core::validation::{parse_identifier, validate_price_cents};
use shopit_core::Product;

const PRODUCT_COLUMNS: &str = "id, name, slug, price_cents, image, description, category";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let product = repo.find_by_slug("sample-laptop").await?;
/// let catalog = repo.list(50).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    /// * `Err(DbError::Validation)` - `id` is not a UUID
    pub async fn find_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let id = parse_identifier("product_id", id)?;

        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products WHERE id = ?1",
            PRODUCT_COLUMNS
        ))
        .bind(&id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by its URL slug.
    pub async fn find_by_slug(&self, slug: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products WHERE slug = ?1",
            PRODUCT_COLUMNS
        ))
        .bind(slug.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists products sorted by name.
    pub async fn list(&self, limit: u32) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products ORDER BY name LIMIT ?1",
            PRODUCT_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Other products in the same category.
    ///
    /// A product without a category has no similar products.
    pub async fn find_similar(&self, product: &Product, limit: u32) -> DbResult<Vec<Product>> {
        let Some(category) = product.category.as_deref() else {
            return Ok(Vec::new());
        };

        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products WHERE category = ?1 AND id != ?2 ORDER BY name LIMIT ?3",
            PRODUCT_COLUMNS
        ))
        .bind(category)
        .bind(&product.id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The product as stored
    /// * `Err(DbError::UniqueViolation)` - Slug already in use
    /// * `Err(DbError::Validation)` - Negative price or malformed id
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        debug!(slug = %product.slug, "Inserting product");

        let id = parse_identifier("product_id", &product.id)?;
        validate_price_cents(product.price_cents)?;

        let stored = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (id, name, slug, price_cents, image, description, category)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(&id)
        .bind(&product.name)
        .bind(&product.slug)
        .bind(product.price_cents)
        .bind(&product.image)
        .bind(&product.description)
        .bind(&product.category)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    /// Deletes a product. Cart items that reference it are left in place.
    ///
    /// ## Returns
    /// * `Ok(true)` - A row was deleted
    /// * `Ok(false)` - No such product
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let id = parse_identifier("product_id", id)?;
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(&id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of products in the catalog.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use crate::repository::fixtures::sample_product as sample;
    use shopit_core::ValidationError;
    use uuid::Uuid;

    async fn setup() -> ProductRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().products()
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = setup().await;
        let product = repo
            .insert(&sample("Sample Laptop", 120_000, Some("Electronics")))
            .await
            .unwrap();

        let by_id = repo.find_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(by_id, product);

        let by_slug = repo.find_by_slug("sample-laptop").await.unwrap().unwrap();
        assert_eq!(by_slug.id, product.id);

        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_absent_is_none() {
        let repo = setup().await;

        let missing = Uuid::new_v4().to_string();
        assert!(repo.find_by_id(&missing).await.unwrap().is_none());
        assert!(repo.find_by_slug("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_malformed_id() {
        let repo = setup().await;

        let err = repo.find_by_id("42").await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Validation(ValidationError::InvalidIdentifier { .. })
        ));
    }

    #[tokio::test]
    async fn test_find_by_id_accepts_uppercase() {
        let repo = setup().await;
        let product = repo.insert(&sample("Rolex Watch", 500_000, None)).await.unwrap();

        let found = repo
            .find_by_id(&product.id.to_uppercase())
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_slug() {
        let repo = setup().await;
        repo.insert(&sample("Sample Laptop", 100, None)).await.unwrap();

        let err = repo
            .insert(&sample("Sample Laptop", 200, None))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_negative_price_rejected() {
        let repo = setup().await;

        let err = repo.insert(&sample("Broken", -1, None)).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Validation(ValidationError::Negative { .. })
        ));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_sorted_and_limited() {
        let repo = setup().await;
        for name in ["Charlie", "Alpha", "Bravo"] {
            repo.insert(&sample(name, 100, None)).await.unwrap();
        }

        let names: Vec<String> = repo
            .list(2)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Bravo"]);
    }

    #[tokio::test]
    async fn test_find_similar() {
        let repo = setup().await;
        let laptop = repo
            .insert(&sample("Laptop", 100, Some("Electronics")))
            .await
            .unwrap();
        repo.insert(&sample("Phone", 100, Some("Electronics")))
            .await
            .unwrap();
        repo.insert(&sample("Shirt", 100, Some("Clothing")))
            .await
            .unwrap();

        let similar = repo.find_similar(&laptop, 4).await.unwrap();
        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].name, "Phone");

        let loner = repo.insert(&sample("Loner", 100, None)).await.unwrap();
        assert!(repo.find_similar(&loner, 4).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = setup().await;
        let product = repo.insert(&sample("Gone Soon", 100, None)).await.unwrap();

        assert!(repo.delete(&product.id).await.unwrap());
        assert!(!repo.delete(&product.id).await.unwrap());
        assert!(repo.find_by_id(&product.id).await.unwrap().is_none());
    }
}
