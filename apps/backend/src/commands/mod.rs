//! # Commands Module
//!
//! Everything the presentation layer can ask of the backend.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (response envelope)
//! ├── product.rs   ◄─── Product CRUD, product list rows
//! ├── sale.rs      ◄─── Sell, sales list, order record removal
//! ├── expense.rs   ◄─── Expense form, quick expense, delete
//! ├── customer.rs  ◄─── Customer directory
//! ├── summary.rs   ◄─── Reconciliation figures
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Mutating Command Flow                                │
//! │                                                                         │
//! │  sell_product(db, ledger, SellRequest)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ledger.lock().await           ◄── one command at a time               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ledger::sell(...)?            ◄── Err → ApiError, nothing changed     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.persist(&ledger, [Products, Sales])                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CommandResponse { data, warning }                                      │
//! │                       ▲                                                 │
//! │                       └── Some(..) when the snapshot write failed       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Read-only
//! async fn list_products(ledger: &LedgerState)
//!
//! // Mutating: ledger plus persistence
//! async fn add_expense(db: &DbState, ledger: &LedgerState, form: ExpenseForm)
//!
//! // Formatting
//! async fn get_summary(ledger: &LedgerState, config: &ConfigState)
//! ```

use serde::Serialize;

pub mod config;
pub mod customer;
pub mod expense;
pub mod product;
pub mod sale;
pub mod summary;

/// Result envelope for mutating commands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse<T> {
    pub data: T,

    /// Set when the change was applied in memory but could not be saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl<T> CommandResponse<T> {
    pub fn new(data: T, warning: Option<String>) -> Self {
        CommandResponse { data, warning }
    }

    pub fn is_saved(&self) -> bool {
        self.warning.is_none()
    }
}
