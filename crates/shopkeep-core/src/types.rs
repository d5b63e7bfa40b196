//! # Domain Types
//!
//! Records owned by the ledger stores.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │    Expense      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (max+1)     │◄──│  productId      │   │  id (max+1)     │       │
//! │  │  name           │   │  quantity       │   │  category       │       │
//! │  │  costPrice      │   │  price (frozen) │   │  amount         │       │
//! │  │  sellingPrice   │   │  timestamp      │   │  description?   │       │
//! │  │  discountedPrice│   └─────────────────┘   │  timestamp      │       │
//! │  │  stock          │                         └─────────────────┘       │
//! │  │  originalStock  │   ┌─────────────────┐                             │
//! │  └─────────────────┘   │    Customer     │  (contact list, unrelated   │
//! │                        │  id, name,      │   to reconciliation)        │
//! │                        │  email, phone   │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! Each store owns its collection. `Sale::product_id` is a non-owning back
//! reference: deleting a product cascades to its sales.
//!
//! Every record serializes with camelCase field names; that JSON is the
//! persisted snapshot format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

pub type ProductId = u64;
pub type ExpenseId = u64;
pub type CustomerId = u64;

/// Next id for a collection: `max(existing ids, 0) + 1`.
///
/// Ids are never reused while a higher id exists, but deleting the highest
/// record frees its id for the next insert.
pub(crate) fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().unwrap_or(0) + 1
}

// =============================================================================
// Price Tier
// =============================================================================

/// Which of a product's two sale prices a sale uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    /// The regular selling price.
    #[default]
    #[serde(alias = "normal", alias = "regular")]
    Selling,
    /// The discounted price.
    Discounted,
}

// =============================================================================
// Product
// =============================================================================

/// A tracked inventory item.
///
/// ## Invariants
/// - `0 <= stock <= original_stock`
/// - `cost_price > 0`, `selling_price > cost_price`,
///   `discounted_price > cost_price`
///   (the discounted price is NOT required to be below the selling price)
///
/// `original_stock` is the unit count at the last create/edit. Editing a
/// product is a re-stocking event: both counts are reset to the new value and
/// earlier sales are not replayed against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub cost_price: Money,
    pub selling_price: Money,
    pub discounted_price: Money,
    /// Units currently on the shelf.
    pub stock: i64,
    /// Units at the last create/edit.
    pub original_stock: i64,
}

impl Product {
    /// Unit price for the given tier.
    #[inline]
    pub fn price_for(&self, tier: PriceTier) -> Money {
        match tier {
            PriceTier::Selling => self.selling_price,
            PriceTier::Discounted => self.discounted_price,
        }
    }

    /// Units sold since the last create/edit.
    #[inline]
    pub fn units_sold(&self) -> i64 {
        self.original_stock.saturating_sub(self.stock)
    }

    /// Cost of everything purchased at the last re-stock.
    #[inline]
    pub fn investment(&self) -> Money {
        self.cost_price.multiply_quantity(self.original_stock)
    }

    /// Cost of the units still on the shelf (the product's "budget").
    #[inline]
    pub fn remaining_value(&self) -> Money {
        self.cost_price.multiply_quantity(self.stock)
    }

    /// Cost of the units already sold.
    #[inline]
    pub fn cost_of_sold(&self) -> Money {
        self.cost_price.multiply_quantity(self.units_sold())
    }

    /// Whether `quantity` units can be taken off the shelf.
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity > 0 && quantity <= self.stock
    }

    pub fn is_sold_out(&self) -> bool {
        self.stock == 0
    }
}

// =============================================================================
// Sale
// =============================================================================

/// An immutable record of units sold at a captured price.
///
/// Uses the snapshot pattern: `price` is the selected tier's price at the
/// moment of sale and is never recomputed from the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub product_id: ProductId,
    pub quantity: i64,
    /// Unit price at time of sale (frozen).
    pub price: Money,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

impl Sale {
    /// `quantity × price`.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Expense
// =============================================================================

/// Categories offered by the expense form. Any non-blank text is accepted.
pub const SUGGESTED_EXPENSE_CATEGORIES: &[&str] =
    &["Food", "Transport", "Rent", "Utilities", "Supplies", "Salary", "Other"];

/// An outflow of cash unrelated to inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub category: String,
    pub amount: Money,
    #[serde(default)]
    pub description: Option<String>,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// Customer
// =============================================================================

/// An entry in the shop's contact list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
