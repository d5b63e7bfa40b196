//! # Expense Ledger
//!
//! Append-with-delete collection of [`Expense`] records. Nothing depends on
//! an expense, so deletion never cascades.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{next_id, Expense, ExpenseId};
use crate::validation::ExpenseDraft;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseLedger {
    expenses: Vec<Expense>,
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_expenses(expenses: Vec<Expense>) -> Self {
        ExpenseLedger { expenses }
    }

    pub fn list_all(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Records an expense with `id = max(ids, 0) + 1` and the given time.
    pub fn append(&mut self, draft: ExpenseDraft, at: DateTime<Utc>) -> Expense {
        let (category, amount, description) = draft.into_parts();
        let expense = Expense {
            id: next_id(self.expenses.iter().map(|e| e.id)),
            category,
            amount,
            description,
            timestamp: at,
        };
        self.expenses.push(expense.clone());
        expense
    }

    pub fn delete(&mut self, id: ExpenseId) -> CoreResult<Expense> {
        let index = self
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or(CoreError::ExpenseNotFound(id))?;
        Ok(self.expenses.remove(index))
    }

    /// Σ amount for one category (exact, case-sensitive match).
    pub fn total_for_category(&self, category: &str) -> Money {
        self.expenses
            .iter()
            .filter(|e| e.category == category)
            .map(|e| e.amount)
            .sum()
    }
}
