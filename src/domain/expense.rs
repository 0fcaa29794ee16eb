use serde::{Deserialize, Serialize};

use super::Amount;

/// A single categorized spending record.
/// Expenses are immutable once recorded; the category is kept exactly as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    category: String,
    amount: Amount,
}

impl Expense {
    /// Create an expense. Amount validation belongs to the ledger.
    pub(crate) fn new(category: String, amount: Amount) -> Self {
        Self { category, amount }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Share of `income` taken by this expense, as a percentage.
    /// Returns `None` when the ratio is undefined: zero income, or an income so
    /// small that the share is not a finite number.
    pub fn percentage_of_income(&self, income: Amount) -> Option<f64> {
        if income == 0.0 {
            return None;
        }
        Some(self.amount / income * 100.0).filter(|p| p.is_finite())
    }
}
