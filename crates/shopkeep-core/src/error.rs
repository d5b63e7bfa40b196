//! # Error Types
//!
//! Domain-specific error types for shopkeep-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopkeep-core errors (this file)                                       │
//! │  ├── ValidationError  - One field-level rule failure                    │
//! │  ├── FieldErrors      - field → message mapping for a whole form        │
//! │  └── CoreError        - Command failures (not found, stock, ...)        │
//! │                                                                         │
//! │  shopkeep-db errors (separate crate)                                    │
//! │  └── DbError          - Durable store failures                          │
//! │                                                                         │
//! │  Backend errors (in app)                                                │
//! │  └── ApiError         - What the presentation layer sees                │
//! │                                                                         │
//! │  Flow: ValidationError → FieldErrors → CoreError → ApiError → UI        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Semantics
//! No error here is fatal. A command that returns `Err` has left every store
//! exactly as it found it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::types::{CustomerId, ExpenseId, ProductId};

// =============================================================================
// Validation Error
// =============================================================================

/// A single field-level rule failure.
///
/// The `Display` text is the message shown next to the form field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing, blank, or not a usable value.
    #[error("{0}")]
    Required(String),

    /// A price is not above the cost price it must exceed.
    #[error("{0}")]
    MustExceedCost(String),

    /// A value has the wrong shape (e.g. an email without a domain).
    #[error("{0}")]
    InvalidFormat(String),
}

impl ValidationError {
    pub fn required(message: impl Into<String>) -> Self {
        ValidationError::Required(message.into())
    }

    pub fn must_exceed_cost(message: impl Into<String>) -> Self {
        ValidationError::MustExceedCost(message.into())
    }

    pub fn invalid_format(message: impl Into<String>) -> Self {
        ValidationError::InvalidFormat(message.into())
    }
}

// =============================================================================
// Field Errors
// =============================================================================

/// Ordered mapping of form field → failure.
///
/// An empty mapping means the form is valid. Serializes as
/// `{ "field": "message", ... }` so the UI can render it directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, ValidationError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure for `field`, replacing any earlier one.
    pub fn insert(&mut self, field: &str, error: ValidationError) {
        self.0.insert(field.to_string(), error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Field names with failures, in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// The field → message mapping as plain strings.
    pub fn messages(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(field, err)| (field.clone(), err.to_string()))
            .collect()
    }

    /// `Ok(value)` when no field failed, otherwise the collected errors.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, err) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, err)?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.messages().serialize(serializer)
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Ledger command failures.
///
/// ## User Workflow
/// ```text
/// Sell (qty: 5)
///      │
///      ▼
/// Check stock: available=2
///      │
///      ▼
/// InsufficientStock { product_id: 1, available: 2, requested: 5 }
///      │
///      ▼
/// Stock stays 2, sales ledger unchanged, UI shows the message
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// One or more form fields failed validation.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Expense not found: {0}")]
    ExpenseNotFound(ExpenseId),

    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// No order record at this position of the sales list.
    #[error("Sale record not found at position {0}")]
    SaleRecordNotFound(usize),

    /// Trying to sell more than is on the shelf.
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: ProductId,
        available: i64,
        requested: i64,
    },

    /// Sell quantity must be a positive number of units.
    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(i64),

    /// A sale record that cannot be appended to the ledger.
    #[error("Invalid sale: {0}")]
    InvalidSale(String),
}

impl From<FieldErrors> for CoreError {
    fn from(errors: FieldErrors) -> Self {
        CoreError::Validation(errors)
    }
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
