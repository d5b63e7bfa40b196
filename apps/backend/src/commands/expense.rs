//! # Expense Commands
//!
//! Recording and removing cash outflows that are not inventory purchases.
//!
//! Two entry points create an expense:
//! - `add_expense`: the full form (category, amount text, optional description)
//! - `quick_expense`: a one-tap button with a preset category and amount
//!
//! Both go through the same category/amount rules.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{debug, info};

use crate::commands::CommandResponse;
use crate::error::ApiError;
use crate::state::{DbState, LedgerState};
use shopkeep_core::validation::validate_expense;
use shopkeep_core::{Expense, ExpenseForm, ExpenseId, Money, SUGGESTED_EXPENSE_CATEGORIES};
use shopkeep_db::Namespace;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickExpenseRequest {
    pub category: String,
    pub amount: Money,
}

/// Categories offered by the form's picker.
pub fn expense_categories() -> Vec<String> {
    SUGGESTED_EXPENSE_CATEGORIES
        .iter()
        .map(|c| c.to_string())
        .collect()
}

pub fn validate_expense_form(form: &ExpenseForm) -> BTreeMap<String, String> {
    validate_expense(form).messages()
}

pub async fn list_expenses(ledger: &LedgerState) -> Vec<Expense> {
    debug!("list_expenses command");
    ledger
        .with_ledger(|l| l.expenses().list_all().to_vec())
        .await
}

pub async fn add_expense(
    db: &DbState,
    ledger: &LedgerState,
    form: ExpenseForm,
) -> Result<CommandResponse<Expense>, ApiError> {
    debug!(category = %form.category, "add_expense command");

    let mut ledger = ledger.lock().await;
    let expense = ledger.record_expense(&form, chrono::Utc::now())?;

    info!(expense_id = expense.id, amount = %expense.amount, "Expense recorded");

    let warning = db.persist(&ledger, &[Namespace::Expenses]).await;
    Ok(CommandResponse::new(expense, warning))
}

pub async fn quick_expense(
    db: &DbState,
    ledger: &LedgerState,
    request: QuickExpenseRequest,
) -> Result<CommandResponse<Expense>, ApiError> {
    debug!(category = %request.category, amount = %request.amount, "quick_expense command");

    let mut ledger = ledger.lock().await;
    let expense = ledger.quick_expense(&request.category, request.amount, chrono::Utc::now())?;

    info!(expense_id = expense.id, category = %expense.category, "Quick expense recorded");

    let warning = db.persist(&ledger, &[Namespace::Expenses]).await;
    Ok(CommandResponse::new(expense, warning))
}

pub async fn delete_expense(
    db: &DbState,
    ledger: &LedgerState,
    id: ExpenseId,
) -> Result<CommandResponse<Expense>, ApiError> {
    debug!(expense_id = id, "delete_expense command");

    let mut ledger = ledger.lock().await;
    let removed = ledger.delete_expense(id)?;

    info!(expense_id = id, "Expense deleted");

    let warning = db.persist(&ledger, &[Namespace::Expenses]).await;
    Ok(CommandResponse::new(removed, warning))
}
