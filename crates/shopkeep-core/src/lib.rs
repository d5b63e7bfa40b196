//! # shopkeep-core: Pure Ledger Logic for Shopkeep
//!
//! Inventory, sales, expenses, customers and the financial reconciliation
//! built on top of them. No I/O of any kind.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopkeep Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Presentation layer                           │   │
//! │  │    Products ──► Sell dialog ──► Sales list ──► Expenses ──► KPIs│   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                shopkeep-backend (commands)                      │   │
//! │  │    add_product, sell_product, add_expense, get_summary, etc.    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ shopkeep-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ validation│  │ inventory │  │   sales   │  │ expenses  │  │   │
//! │  │   │  drafts   │  │  Product  │  │   Sale    │  │  Expense  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │         ┌─────────────┐   ┌────────────────┐                   │   │
//! │  │         │   ledger    │──►│ reconciliation │                   │   │
//! │  │         └─────────────┘   └────────────────┘                   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK READS IN LEDGER OPS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 shopkeep-db (persistence)                       │   │
//! │  │          key-value snapshots per namespace, SQLite              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money in minor units (no floating point)
//! - [`types`] - Product, Sale, Expense, Customer
//! - [`validation`] - Form rules and validated drafts
//! - [`inventory`] / [`sales`] / [`expenses`] / [`customers`] - the stores
//! - [`reconciliation`] - derived financial figures
//! - [`ledger`] - the state container commands run against
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use shopkeep_core::{Ledger, Money, PriceTier, ProductForm};
//!
//! let mut ledger = Ledger::new();
//! let widget = ledger
//!     .add_product(&ProductForm {
//!         name: "Widget".into(),
//!         cost_price: "100".into(),
//!         selling_price: "150".into(),
//!         discounted_price: "120".into(),
//!         stock: "10".into(),
//!     })
//!     .unwrap();
//!
//! ledger.sell(widget.id, 3, PriceTier::Selling, Utc::now()).unwrap();
//!
//! let summary = ledger.summary();
//! assert_eq!(summary.total_revenue, Money::from_major(450));
//! assert_eq!(summary.profit, Money::from_major(150));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod customers;
pub mod error;
pub mod expenses;
pub mod inventory;
pub mod ledger;
pub mod money;
pub mod reconciliation;
pub mod sales;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use customers::CustomerDirectory;
pub use error::{CoreError, CoreResult, FieldErrors, ValidationError};
pub use expenses::ExpenseLedger;
pub use inventory::Inventory;
pub use ledger::Ledger;
pub use money::Money;
pub use reconciliation::FinancialSummary;
pub use sales::SalesLedger;
pub use types::*;
pub use validation::{CustomerForm, ExpenseForm, ProductForm};
