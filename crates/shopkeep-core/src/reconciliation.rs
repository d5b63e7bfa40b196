//! # Reconciliation Engine
//!
//! Derives the shop's financial position from raw records. Nothing here is
//! cached: every figure is recomputed from the current collections on each
//! call, so no other module keeps a running total.
//!
//! ## Dependency Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products ──► totalInvestment      Σ costPrice × originalStock         │
//! │           ──► remainingStockValue  Σ costPrice × stock                 │
//! │           ──► costOfSoldItems      Σ costPrice × (originalStock−stock) │
//! │  sales    ──► totalRevenue         Σ quantity × price                  │
//! │  expenses ──► totalExpenses        Σ amount                            │
//! │                                                                         │
//! │  profit        = totalRevenue − costOfSoldItems                         │
//! │  availableCash = profit − totalExpenses                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Profit
//! Profit is measured against the cost of the units actually sold. The
//! investment-based figure (`totalRevenue − totalInvestment`) goes negative
//! for any shop holding unsold stock and is only available through the
//! deprecated [`FinancialSummary::profit_against_investment`].
//!
//! `costOfSoldItems` comes from product stock counts while `totalRevenue`
//! comes from the sales ledger. Removing an order record from the sales list
//! lowers revenue but leaves cost of sold items as it was.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Expense, Product, Sale};

// =============================================================================
// Aggregates
// =============================================================================

pub fn total_investment(products: &[Product]) -> Money {
    products.iter().map(Product::investment).sum()
}

pub fn remaining_stock_value(products: &[Product]) -> Money {
    products.iter().map(Product::remaining_value).sum()
}

pub fn cost_of_sold_items(products: &[Product]) -> Money {
    products.iter().map(Product::cost_of_sold).sum()
}

pub fn total_revenue(sales: &[Sale]) -> Money {
    sales.iter().map(Sale::line_total).sum()
}

pub fn total_expenses(expenses: &[Expense]) -> Money {
    expenses.iter().map(|e| e.amount).sum()
}

pub fn total_original_stock(products: &[Product]) -> i64 {
    products
        .iter()
        .fold(0i64, |acc, p| acc.saturating_add(p.original_stock))
}

pub fn total_units_sold(products: &[Product]) -> i64 {
    products
        .iter()
        .fold(0i64, |acc, p| acc.saturating_add(p.units_sold()))
}

/// True once every unit ever stocked has been sold. An empty or zero-stock
/// inventory is never "all sold".
pub fn all_sold(products: &[Product]) -> bool {
    let original = total_original_stock(products);
    original > 0 && original == total_units_sold(products)
}

// =============================================================================
// Summary
// =============================================================================

/// Every aggregate at once, as shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_investment: Money,
    pub remaining_stock_value: Money,
    pub total_revenue: Money,
    pub cost_of_sold_items: Money,
    pub profit: Money,
    pub total_expenses: Money,
    pub available_cash: Money,
    pub total_original_stock: i64,
    pub total_units_sold: i64,
    pub all_sold: bool,
}

impl FinancialSummary {
    pub fn compute(products: &[Product], sales: &[Sale], expenses: &[Expense]) -> Self {
        let total_revenue = total_revenue(sales);
        let cost_of_sold_items = cost_of_sold_items(products);
        let profit = total_revenue - cost_of_sold_items;
        let total_expenses = total_expenses(expenses);

        FinancialSummary {
            total_investment: total_investment(products),
            remaining_stock_value: remaining_stock_value(products),
            total_revenue,
            cost_of_sold_items,
            profit,
            total_expenses,
            available_cash: profit - total_expenses,
            total_original_stock: total_original_stock(products),
            total_units_sold: total_units_sold(products),
            all_sold: all_sold(products),
        }
    }

    /// `totalRevenue − totalInvestment`.
    #[deprecated(note = "profit is measured against cost of sold items; use `profit`")]
    pub fn profit_against_investment(&self) -> Money {
        self.total_revenue - self.total_investment
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
