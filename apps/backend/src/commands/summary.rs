//! # Summary Command
//!
//! The reconciliation figures shown on the dashboard, raw and formatted.
//!
//! ```text
//! ┌──────────────────────────┬──────────────────────────────────────────────┐
//! │ Total investment         │ Σ costPrice × originalStock                  │
//! │ Remaining stock value    │ Σ costPrice × stock                          │
//! │ Total revenue            │ Σ quantity × price  (sales)                  │
//! │ Cost of sold items       │ Σ costPrice × (originalStock − stock)        │
//! │ Profit                   │ revenue − cost of sold items                 │
//! │ Total expenses           │ Σ amount  (expenses)                         │
//! │ Available cash           │ revenue − expenses                           │
//! └──────────────────────────┴──────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use crate::state::{ConfigState, LedgerState};
use shopkeep_core::FinancialSummary;

/// Money figures rendered with the configured currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedSummary {
    pub total_investment: String,
    pub remaining_stock_value: String,
    pub total_revenue: String,
    pub cost_of_sold_items: String,
    pub profit: String,
    pub total_expenses: String,
    pub available_cash: String,
}

impl FormattedSummary {
    fn new(summary: &FinancialSummary, config: &ConfigState) -> Self {
        let fmt = |m| config.format_currency(m);
        FormattedSummary {
            total_investment: fmt(summary.total_investment),
            remaining_stock_value: fmt(summary.remaining_stock_value),
            total_revenue: fmt(summary.total_revenue),
            cost_of_sold_items: fmt(summary.cost_of_sold_items),
            profit: fmt(summary.profit),
            total_expenses: fmt(summary.total_expenses),
            available_cash: fmt(summary.available_cash),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub figures: FinancialSummary,
    pub formatted: FormattedSummary,
}

/// Recomputes every figure from the current ledger.
pub async fn get_summary(ledger: &LedgerState, config: &ConfigState) -> SummaryResponse {
    let figures = ledger.with_ledger(|l| l.summary()).await;
    debug!(
        profit = %figures.profit,
        available_cash = %figures.available_cash,
        "get_summary command"
    );

    SummaryResponse {
        formatted: FormattedSummary::new(&figures, config),
        figures,
    }
}
