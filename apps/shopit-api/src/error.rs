//! # API Error Types
//!
//! Service-level and wire-level errors for the HTTP API.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in ShopIt                                 │
//! │                                                                         │
//! │  Storefront                  Rust Backend                               │
//! │  ──────────                  ────────────                               │
//! │                                                                         │
//! │  POST /add_item                                                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  CartService → Result<T, ServiceError>                           │  │
//! │  │         │                                                        │  │
//! │  │  DbError::Validation ──── lifted ───► CoreError::Validation     │  │
//! │  │  DbError (other) ───────────────────► ServiceError::Db          │  │
//! │  │  CoreError ─────────────────────────► ServiceError::Core        │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Handler → Result<_, ApiError> → (status, {code, message})      │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "ITEM_NOT_FOUND", "message": "Cart item not found: ..." }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage failures are logged with their detail and reach the client as a
//! generic message.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use shopit_core::{CoreError, ValidationError};
use shopit_db::DbError;

// =============================================================================
// Service Error
// =============================================================================

/// Errors returned by [`CartService`](crate::services::cart_service::CartService).
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(DbError),
}

/// Ids rejected by a repository are still caller errors.
impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Validation(e) => ServiceError::Core(CoreError::Validation(e)),
            other => ServiceError::Db(other),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Core(err.into())
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// API Error
// =============================================================================

/// Error body returned to HTTP clients.
///
/// ```json
/// {
///   "code": "INVALID_QUANTITY",
///   "message": "Invalid quantity: 0 is below the minimum of 1"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed id (400)
    InvalidIdentifier,

    /// Required field absent or blank (400)
    MissingField,

    /// Quantity missing, not an integer, or below 1 (400)
    InvalidQuantity,

    /// Any other rejected input: over-long cart code, unreadable body (400)
    ValidationError,

    /// (404)
    ProductNotFound,

    /// No unpaid cart for the code (404)
    CartNotFound,

    /// (404)
    ItemNotFound,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::InvalidIdentifier
            | ErrorCode::MissingField
            | ErrorCode::InvalidQuantity
            | ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::ProductNotFound | ErrorCode::CartNotFound | ErrorCode::ItemNotFound => {
                StatusCode::NOT_FOUND
            }
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::MissingField { .. } => ErrorCode::MissingField,
            ValidationError::InvalidIdentifier { .. } => ErrorCode::InvalidIdentifier,
            ValidationError::InvalidQuantity { .. } => ErrorCode::InvalidQuantity,
            ValidationError::TooLong { .. } | ValidationError::Negative { .. } => {
                ErrorCode::ValidationError
            }
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            CoreError::ProductNotFound(_) => {
                ApiError::new(ErrorCode::ProductNotFound, err.to_string())
            }
            CoreError::CartNotFound(_) => ApiError::new(ErrorCode::CartNotFound, err.to_string()),
            CoreError::ItemNotFound(_) => ApiError::new(ErrorCode::ItemNotFound, err.to_string()),
        }
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Validation(e) => e.into(),
            DbError::NotFound { entity, id } => match entity.as_str() {
                "Product" => CoreError::ProductNotFound(id).into(),
                "Cart" => CoreError::CartNotFound(id).into(),
                "CartItem" => CoreError::ItemNotFound(id).into(),
                _ => {
                    tracing::error!(entity = %entity, id = %id, "Unexpected missing record");
                    ApiError::internal("Record not found")
                }
            },
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::PoolExhausted => {
                tracing::error!("Database pool exhausted");
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            other => {
                // Log the actual error but return a generic message
                tracing::error!("Database operation failed: {}", other);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Core(e) => e.into(),
            ServiceError::Db(e) => e.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(ErrorCode::ValidationError, rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::new(ErrorCode::ValidationError, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_validation_is_lifted() {
        let err: ServiceError = DbError::Validation(ValidationError::invalid_identifier("item_id", "x")).into();
        assert!(matches!(
            err,
            ServiceError::Core(CoreError::Validation(ValidationError::InvalidIdentifier { .. }))
        ));
    }

    #[test]
    fn test_codes_and_statuses() {
        let err: ApiError = CoreError::ItemNotFound("abc".into()).into();
        assert_eq!(err.code, ErrorCode::ItemNotFound);
        assert_eq!(err.code.status(), StatusCode::NOT_FOUND);

        let err: ApiError = ValidationError::invalid_quantity("0 is below the minimum of 1").into();
        assert_eq!(err.code, ErrorCode::InvalidQuantity);
        assert_eq!(err.code.status(), StatusCode::BAD_REQUEST);

        let err: ApiError = ValidationError::missing("cart_code").into();
        assert_eq!(err.code, ErrorCode::MissingField);
    }

    #[test]
    fn test_db_detail_is_hidden() {
        let err: ApiError = DbError::QueryFailed("no such table: carts".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("carts"));
        assert_eq!(err.code.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_serialized_code() {
        let err = ApiError::new(ErrorCode::CartNotFound, "Cart not found: abc");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "CART_NOT_FOUND");
        assert_eq!(json["message"], "Cart not found: abc");
    }
}
