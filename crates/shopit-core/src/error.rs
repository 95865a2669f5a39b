//! # Error Types
//!
//! The cart error taxonomy.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopit-core errors (this file)                                        │
//! │  ├── CoreError        - Referenced entity absent                       │
//! │  └── ValidationError  - Caller input rejected                          │
//! │                                                                         │
//! │  shopit-db errors (separate crate)                                     │
//! │  └── DbError          - Storage failures                               │
//! │                                                                         │
//! │  shopit-api errors (in app)                                            │
//! │  ├── ServiceError     - CoreError | DbError                            │
//! │  └── ApiError         - What the client sees ({code, message})         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → ApiError → Client  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "Not found" and "invalid input" stay distinct all the way up: the first
//! maps to 404, the second to 400.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The product id does not resolve to a product.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No unpaid cart exists for the cart code.
    ///
    /// ## When This Occurs
    /// - The cart code was never used
    /// - Every cart for the code has been paid
    #[error("Cart not found: {0}")]
    CartNotFound(String),

    /// The cart item id does not resolve to a row.
    #[error("Cart item not found: {0}")]
    ItemNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any store access.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required request field is missing or blank.
    #[error("{field} is required")]
    MissingField { field: String },

    /// An identifier is not a structurally valid UUID.
    #[error("{field} is not a valid identifier: '{value}'")]
    InvalidIdentifier { field: String, value: String },

    /// Quantity is missing, not an integer, or below 1.
    #[error("Invalid quantity: {reason}")]
    InvalidQuantity { reason: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },
}

impl ValidationError {
    /// Creates a MissingField error.
    pub fn missing(field: impl Into<String>) -> Self {
        ValidationError::MissingField {
            field: field.into(),
        }
    }

    /// Creates an InvalidIdentifier error.
    pub fn invalid_identifier(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::InvalidIdentifier {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates an InvalidQuantity error.
    pub fn invalid_quantity(reason: impl Into<String>) -> Self {
        ValidationError::InvalidQuantity {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::CartNotFound("abc123".to_string());
        assert_eq!(err.to_string(), "Cart not found: abc123");

        let err = CoreError::ItemNotFound("42".to_string());
        assert_eq!(err.to_string(), "Cart item not found: 42");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::missing("cart_code").to_string(),
            "cart_code is required"
        );
        assert_eq!(
            ValidationError::invalid_identifier("product_id", "xyz").to_string(),
            "product_id is not a valid identifier: 'xyz'"
        );
        assert_eq!(
            ValidationError::invalid_quantity("must be at least 1").to_string(),
            "Invalid quantity: must be at least 1"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::missing("item_id").into();
        assert!(matches!(
            core_err,
            CoreError::Validation(ValidationError::MissingField { .. })
        ));
    }
}
