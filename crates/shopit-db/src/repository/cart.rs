//! # Cart Repository
//!
//! Carts keyed by the client's `cart_code`.
//!
//! ## Active Cart
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle per cart_code                         │
//! │                                                                         │
//! │  (none) ──get_or_create──► active (paid = 0) ──mark_paid──► paid        │
//! │                                 ▲                              │        │
//! │                                 └────── get_or_create ─────────┘        │
//! │                                   (opens a fresh, empty cart)           │
//! │                                                                         │
//! │  UNIQUE INDEX carts(cart_code) WHERE paid = 0                          │
//! │  └── at most one active cart per code, even under concurrent adds      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use shopit_core::validation::validate_cart_code;
use shopit_core::Cart;

/// Repository for cart database operations.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    /// Creates a new CartRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// Returns the active cart for `cart_code`, creating it if absent.
    ///
    /// ## Race Handling
    /// The insert is a no-op when an active cart already exists, so two
    /// concurrent calls for an unseen code both end up reading the same row.
    pub async fn get_or_create(&self, cart_code: &str) -> DbResult<Cart> {
        let cart_code = validate_cart_code(cart_code)?;
        let now = Utc::now();

        let inserted = sqlx::query(
            r#"
            INSERT INTO carts (id, cart_code, paid, created_at, modified_at)
            VALUES (?1, ?2, 0, ?3, ?3)
            ON CONFLICT (cart_code) WHERE paid = 0 DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&cart_code)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if inserted.rows_affected() > 0 {
            debug!(cart_code = %cart_code, "Created cart");
        }

        self.get_active(&cart_code)
            .await?
            .ok_or_else(|| DbError::not_found("Cart", cart_code))
    }

    /// Gets the unpaid cart for `cart_code`.
    ///
    /// `None` when the code was never used or every cart for it is paid.
    pub async fn get_active(&self, cart_code: &str) -> DbResult<Option<Cart>> {
        let cart_code = validate_cart_code(cart_code)?;

        let cart = sqlx::query_as::<_, Cart>(
            r#"
            SELECT id, cart_code, paid, created_at, modified_at
            FROM carts
            WHERE cart_code = ?1 AND paid = 0
            "#,
        )
        .bind(&cart_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(cart)
    }

    /// Bumps `modified_at` on the active cart.
    ///
    /// ## Returns
    /// * `Ok(true)` - Cart touched
    /// * `Ok(false)` - No active cart for the code
    pub async fn touch(&self, cart_code: &str) -> DbResult<bool> {
        let cart_code = validate_cart_code(cart_code)?;

        let result = sqlx::query(
            "UPDATE carts SET modified_at = ?2 WHERE cart_code = ?1 AND paid = 0",
        )
        .bind(&cart_code)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Marks the active cart as paid and clears the code's items.
    ///
    /// Items are keyed by `cart_code`, so they are deleted in the same
    /// transaction; the next `get_or_create` for the code opens an empty
    /// cart. The paid cart row stays as history.
    pub async fn mark_paid(&self, cart_code: &str) -> DbResult<Cart> {
        let cart_code = validate_cart_code(cart_code)?;
        debug!(cart_code = %cart_code, "Marking cart paid");

        let mut tx = self.pool.begin().await?;

        let cart = sqlx::query_as::<_, Cart>(
            r#"
            UPDATE carts SET paid = 1, modified_at = ?2
            WHERE cart_code = ?1 AND paid = 0
            RETURNING id, cart_code, paid, created_at, modified_at
            "#,
        )
        .bind(&cart_code)
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(cart) = cart else {
            return Err(DbError::not_found("Cart", cart_code));
        };

        let cleared = sqlx::query("DELETE FROM cart_items WHERE cart_code = ?1")
            .bind(&cart_code)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(cart_code = %cart_code, items = cleared.rows_affected(), "Cart paid");
        Ok(cart)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::fixtures::sample_product;
    use shopit_core::ValidationError;

    async fn setup() -> CartRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().carts()
    }

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let repo = setup().await;

        let first = repo.get_or_create("h7Kd9").await.unwrap();
        let second = repo.get_or_create("h7Kd9").await.unwrap();

        assert_eq!(first.id, second.id);
        assert!(!first.paid);
        assert_eq!(first.created_at, first.modified_at);
    }

    #[tokio::test]
    async fn test_get_active_absent() {
        let repo = setup().await;
        assert!(repo.get_active("unseen").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blank_code_rejected() {
        let repo = setup().await;

        let err = repo.get_or_create("  ").await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Validation(ValidationError::MissingField { .. })
        ));
    }

    #[tokio::test]
    async fn test_touch_advances_modified_at() {
        let repo = setup().await;
        let cart = repo.get_or_create("abc").await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        assert!(repo.touch("abc").await.unwrap());

        let touched = repo.get_active("abc").await.unwrap().unwrap();
        assert!(touched.modified_at > cart.modified_at);
        assert_eq!(touched.created_at, cart.created_at);

        assert!(!repo.touch("other").await.unwrap());
    }

    #[tokio::test]
    async fn test_mark_paid_opens_new_cart() {
        let repo = setup().await;
        let original = repo.get_or_create("abc").await.unwrap();

        let paid = repo.mark_paid("abc").await.unwrap();
        assert!(paid.paid);
        assert_eq!(paid.id, original.id);

        // All carts for the code are paid: no active cart.
        assert!(repo.get_active("abc").await.unwrap().is_none());
        assert!(matches!(
            repo.mark_paid("abc").await,
            Err(DbError::NotFound { .. })
        ));

        let fresh = repo.get_or_create("abc").await.unwrap();
        assert_ne!(fresh.id, original.id);
        assert!(!fresh.paid);
    }

    #[tokio::test]
    async fn test_mark_paid_clears_items() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = db
            .products()
            .insert(&sample_product("Sample Laptop", 1000, None))
            .await
            .unwrap();

        db.carts().get_or_create("abc").await.unwrap();
        db.cart_items()
            .upsert_increment("abc", &product.id, 2)
            .await
            .unwrap();
        db.cart_items()
            .upsert_increment("other", &product.id, 1)
            .await
            .unwrap();

        db.carts().mark_paid("abc").await.unwrap();
        db.carts().get_or_create("abc").await.unwrap();

        assert!(db.cart_items().list_for_cart("abc").await.unwrap().is_empty());
        assert!(db.cart_items().find("abc", &product.id).await.unwrap().is_none());
        assert_eq!(db.cart_items().list_for_cart("other").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mark_paid_without_cart_keeps_items() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = db
            .products()
            .insert(&sample_product("Sample Laptop", 1000, None))
            .await
            .unwrap();
        db.cart_items()
            .upsert_increment("abc", &product.id, 1)
            .await
            .unwrap();

        assert!(matches!(
            db.carts().mark_paid("abc").await,
            Err(DbError::NotFound { .. })
        ));
        assert_eq!(db.cart_items().list_for_cart("abc").await.unwrap().len(), 1);
    }
}
