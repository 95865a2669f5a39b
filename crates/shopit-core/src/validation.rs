//! # Validation Module
//!
//! Input rules applied before any store access.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (axum)                                        │
//! │  └── JSON shape only; every field is optional at this point            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── required fields present      → MissingField                       │
//! │  ├── ids parse as UUID            → InvalidIdentifier                  │
//! │  └── quantity integer in 1..=MAX  → InvalidQuantity                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── UNIQUE (cart_code, product_id)                                    │
//! │  └── CHECK (quantity BETWEEN 1 AND MAX_QUANTITY)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopit_core::validation::{parse_identifier, validate_quantity};
//!
//! let id = parse_identifier("item_id", "550E8400-E29B-41D4-A716-446655440000").unwrap();
//! assert_eq!(id, "550e8400-e29b-41d4-a716-446655440000");
//! assert!(validate_quantity(0).is_err());
//! ```

use serde_json::Value;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::{MAX_CART_CODE_LEN, MAX_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Presence
// =============================================================================

/// Returns the trimmed value of a required field.
///
/// `None`, empty and whitespace-only values are all `MissingField`.
pub fn require_field<'a>(field: &str, value: Option<&'a str>) -> ValidationResult<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::missing(field)),
    }
}

// =============================================================================
// Identifier Validators
// =============================================================================

/// Parses an identifier and returns its canonical form.
///
/// ## Rules
/// - Must not be empty (`MissingField`)
/// - Must parse as a UUID (`InvalidIdentifier`)
/// - Returned lowercase and hyphenated, the form ids are stored in
///
/// ## Example
/// ```rust
/// use shopit_core::validation::parse_identifier;
///
/// assert!(parse_identifier("product_id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(parse_identifier("product_id", "not-a-uuid").is_err());
/// ```
pub fn parse_identifier(field: &str, raw: &str) -> ValidationResult<String> {
    let raw = require_field(field, Some(raw))?;

    Uuid::parse_str(raw)
        .map(|id| id.to_string())
        .map_err(|_| ValidationError::invalid_identifier(field, raw))
}

/// Validates a client-supplied cart code.
///
/// ## Rules
/// - Must not be empty
/// - At most MAX_CART_CODE_LEN (100) characters after trimming
///
/// Cart codes are opaque: any other content is accepted.
pub fn validate_cart_code(raw: &str) -> ValidationResult<String> {
    let code = require_field("cart_code", Some(raw))?;

    if code.chars().count() > MAX_CART_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "cart_code".to_string(),
            max: MAX_CART_CODE_LEN,
        });
    }

    Ok(code.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be at least 1
/// - At most MAX_QUANTITY
///
/// A request for 0 is rejected, never treated as a removal.
pub fn validate_quantity(qty: i64) -> ValidationResult<i64> {
    if qty < 1 {
        return Err(ValidationError::invalid_quantity(format!(
            "{} is below the minimum of 1",
            qty
        )));
    }

    if qty > MAX_QUANTITY {
        return Err(ValidationError::invalid_quantity(format!(
            "{} exceeds the maximum of {}",
            qty, MAX_QUANTITY
        )));
    }

    Ok(qty)
}

/// Parses a quantity from a JSON request value.
///
/// ## Accepted Shapes
/// ```text
/// ┌──────────────────┬────────────────────────────────────────────┐
/// │  Input           │  Result                                    │
/// ├──────────────────┼────────────────────────────────────────────┤
/// │  3               │  Ok(3)                                     │
/// │  "3" / " 3 "     │  Ok(3)                                     │
/// │  0, -2, "0"      │  InvalidQuantity (below 1)                 │
/// │  2.5, "abc"      │  InvalidQuantity (not an integer)          │
/// │  null / absent   │  InvalidQuantity (missing)                 │
/// └──────────────────┴────────────────────────────────────────────┘
/// ```
pub fn parse_quantity(raw: Option<&Value>) -> ValidationResult<i64> {
    let qty = match raw {
        None | Some(Value::Null) => {
            return Err(ValidationError::invalid_quantity("quantity is required"))
        }
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| ValidationError::invalid_quantity(format!("{} is not an integer", n)))?,
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| {
            ValidationError::invalid_quantity(format!("'{}' is not an integer", s))
        })?,
        Some(other) => {
            return Err(ValidationError::invalid_quantity(format!(
                "{} is not an integer",
                other
            )))
        }
    };

    validate_quantity(qty)
}

/// Validates a price in cents.
///
/// Zero is allowed (free items).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_field() {
        assert_eq!(require_field("cart_code", Some(" abc ")).unwrap(), "abc");
        assert!(matches!(
            require_field("cart_code", None),
            Err(ValidationError::MissingField { .. })
        ));
        assert!(require_field("cart_code", Some("   ")).is_err());
    }

    #[test]
    fn test_parse_identifier() {
        let id = parse_identifier("item_id", "550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(id, "550e8400-e29b-41d4-a716-446655440000");

        assert!(matches!(
            parse_identifier("item_id", "123"),
            Err(ValidationError::InvalidIdentifier { .. })
        ));
        assert!(matches!(
            parse_identifier("item_id", ""),
            Err(ValidationError::MissingField { .. })
        ));
    }

    #[test]
    fn test_validate_cart_code() {
        assert_eq!(validate_cart_code(" h7Kd9 ").unwrap(), "h7Kd9");
        assert!(validate_cart_code("").is_err());
        assert!(matches!(
            validate_cart_code(&"x".repeat(101)),
            Err(ValidationError::TooLong { .. })
        ));
        assert!(validate_cart_code(&"x".repeat(100)).is_ok());
    }

    #[test]
    fn test_validate_quantity() {
        assert_eq!(validate_quantity(1).unwrap(), 1);
        assert_eq!(validate_quantity(1000).unwrap(), 1000);
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert_eq!(validate_quantity(MAX_QUANTITY).unwrap(), MAX_QUANTITY);
        assert!(validate_quantity(MAX_QUANTITY + 1).is_err());
        assert!(validate_quantity(i64::MAX).is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(Some(&json!(3))).unwrap(), 3);
        assert_eq!(parse_quantity(Some(&json!(" 7 "))).unwrap(), 7);

        for bad in [json!(0), json!(-2), json!("0"), json!(2.5), json!("abc"), json!(true), json!(null)] {
            assert!(
                matches!(
                    parse_quantity(Some(&bad)),
                    Err(ValidationError::InvalidQuantity { .. })
                ),
                "{} should be rejected",
                bad
            );
        }
        assert!(parse_quantity(None).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }
}
