//! # API Error Type
//!
//! Unified error type for backend commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Shopkeep                               │
//! │                                                                         │
//! │  Presentation layer              Rust Backend                           │
//! │  ──────────────────              ────────────                           │
//! │                                                                         │
//! │  sell_product({ productId, quantity, priceTier })                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<CommandResponse<T>, ApiError>                            │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Ledger rule broken? ─── CoreError ──────────────► ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Snapshot write failed? ── NOT an error: response.warning ──────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  catch (e) {                                                            │
//! │    // e.code = "INSUFFICIENT_STOCK"                                     │
//! │    // e.message = "Insufficient stock for product 1: available 2, ..." │
//! │    // e.fields = { sellingPrice: "..." }   (validation only)            │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use shopkeep_core::{CoreError, FieldErrors};
use shopkeep_db::DbError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Validation failed: name: Product name is required",
///   "fields": { "name": "Product name is required" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Per-field messages when a form was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referenced record does not exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Sell quantity exceeds current stock
    InsufficientStock,

    /// Storage operation failed
    DatabaseError,

    /// A ledger rule refused the operation
    BusinessLogic,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            fields: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, message)
    }

    /// A rejected form, carrying every field message.
    pub fn validation(errors: &FieldErrors) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: format!("Validation failed: {errors}"),
            fields: Some(errors.messages()),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts ledger errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(errors) => ApiError::validation(&errors),
            CoreError::ProductNotFound(_)
            | CoreError::ExpenseNotFound(_)
            | CoreError::CustomerNotFound(_)
            | CoreError::SaleRecordNotFound(_) => ApiError::not_found(err.to_string()),
            CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::InvalidQuantity(_) => {
                let message = err.to_string();
                ApiError {
                    code: ErrorCode::ValidationError,
                    fields: Some(BTreeMap::from([("quantity".to_string(), message.clone())])),
                    message,
                }
            }
            CoreError::InvalidSale(_) => ApiError::new(ErrorCode::BusinessLogic, err.to_string()),
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::validation(&errors)
    }
}

/// Converts storage errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        // Log the actual error but return a generic message
        tracing::error!(error = %err, "Storage operation failed");
        let message = match err {
            DbError::ConnectionFailed(_) => "Database connection failed",
            DbError::MigrationFailed(_) => "Database migration failed",
            DbError::PoolExhausted => "Database pool exhausted",
            DbError::Serialization(_) => "Could not serialize ledger data",
            DbError::WriteRejected { .. } | DbError::QueryFailed(_) | DbError::Internal(_) => {
                "Database operation failed"
            }
        };
        ApiError::new(ErrorCode::DatabaseError, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use shopkeep_core::validation::{validate_product, ProductForm};

    #[test]
    fn test_validation_error_carries_fields() {
        let errors = validate_product(&ProductForm::default());
        let api: ApiError = CoreError::from(errors).into();

        assert_eq!(api.code, ErrorCode::ValidationError);
        let fields = api.fields.unwrap();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields["name"], "Product name is required");
    }

    #[test]
    fn test_error_codes() {
        let api = ApiError::from(CoreError::ProductNotFound(9));
        assert_eq!(api.code, ErrorCode::NotFound);
        assert_eq!(api.message, "Product not found: 9");

        let api = ApiError::from(CoreError::InsufficientStock {
            product_id: 1,
            available: 2,
            requested: 5,
        });
        assert_eq!(api.code, ErrorCode::InsufficientStock);

        let api = ApiError::from(CoreError::InvalidQuantity(0));
        assert_eq!(api.code, ErrorCode::ValidationError);
        assert!(api.fields.unwrap().contains_key("quantity"));

        let api = ApiError::from(DbError::PoolExhausted);
        assert_eq!(api.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::from(CoreError::SaleRecordNotFound(3))).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert!(json.get("fields").is_none());
    }
}
