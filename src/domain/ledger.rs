use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::{Amount, Expense, Summary, SummaryPolicy};

/// Which value a rejected argument was meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Income,
    ExpenseAmount,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Income => "income",
            Field::ExpenseAmount => "expense amount",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

const NOT_NON_NEGATIVE: &str = "must be a non-negative number";
const TOTAL_OVERFLOW: &str = "total expenses would not be a finite number";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Invalid {field}: {value} ({reason})")]
    InvalidArgument {
        field: Field,
        value: Amount,
        reason: &'static str,
    },
}

fn validate(field: Field, value: Amount) -> Result<Amount, LedgerError> {
    // NaN fails both comparisons, so test for the accepted range.
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LedgerError::InvalidArgument {
            field,
            value,
            reason: NOT_NON_NEGATIVE,
        })
    }
}

/// Holds one monthly income figure and the expenses recorded against it.
///
/// Expenses keep insertion order. Summaries work on a sorted copy and never
/// reorder what is stored here.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    income: Option<Amount>,
    expenses: Vec<Expense>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the monthly income. Rejects negative and non-finite values,
    /// leaving the previous income in place.
    pub fn set_income(&mut self, value: Amount) -> Result<(), LedgerError> {
        self.income = Some(validate(Field::Income, value)?);
        Ok(())
    }

    /// Record an expense. The category is stored verbatim; duplicates are kept
    /// as separate entries. An amount that would push the total past the
    /// largest finite value is rejected like a negative one.
    pub fn add_expense(
        &mut self,
        category: impl Into<String>,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let amount = validate(Field::ExpenseAmount, amount)?;
        if !(self.total_expenses() + amount).is_finite() {
            return Err(LedgerError::InvalidArgument {
                field: Field::ExpenseAmount,
                value: amount,
                reason: TOTAL_OVERFLOW,
            });
        }
        self.expenses.push(Expense::new(category.into(), amount));
        Ok(())
    }

    /// Current income, 0 while it has not been set.
    pub fn income(&self) -> Amount {
        self.income.unwrap_or(0.0)
    }

    pub fn has_income(&self) -> bool {
        self.income.is_some()
    }

    /// Expenses in the order they were added.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn total_expenses(&self) -> Amount {
        self.expenses.iter().map(Expense::amount).sum()
    }

    /// Income minus total expenses. Negative when overspending.
    pub fn remaining_balance(&self) -> Amount {
        self.income() - self.total_expenses()
    }

    pub fn percentage_of_income(&self, expense: &Expense) -> Option<f64> {
        expense.percentage_of_income(self.income())
    }

    /// Build a summary with the default savings rate and threshold.
    pub fn build_summary(&self) -> Summary {
        self.build_summary_with(&SummaryPolicy::default())
    }

    pub fn build_summary_with(&self, policy: &SummaryPolicy) -> Summary {
        Summary::build(self, policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ledger() {
        let ledger = Ledger::new();
        assert!(!ledger.has_income());
        assert_eq!(ledger.income(), 0.0);
        assert_eq!(ledger.total_expenses(), 0.0);
        assert_eq!(ledger.remaining_balance(), 0.0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_set_income_overwrites() {
        let mut ledger = Ledger::new();
        ledger.set_income(1000.0).unwrap();
        ledger.set_income(2500.0).unwrap();
        assert!(ledger.has_income());
        assert_eq!(ledger.income(), 2500.0);
    }

    #[test]
    fn test_set_income_accepts_zero() {
        let mut ledger = Ledger::new();
        ledger.set_income(0.0).unwrap();
        assert!(ledger.has_income());
        assert_eq!(ledger.income(), 0.0);
    }

    #[test]
    fn test_negative_income_rejected_and_state_kept() {
        let mut ledger = Ledger::new();
        ledger.set_income(1000.0).unwrap();

        let err = ledger.set_income(-1.0).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InvalidArgument {
                field: Field::Income,
                value: -1.0,
                reason: NOT_NON_NEGATIVE,
            }
        );
        assert_eq!(ledger.income(), 1000.0);
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let mut ledger = Ledger::new();
        assert!(ledger.set_income(f64::NAN).is_err());
        assert!(ledger.set_income(f64::INFINITY).is_err());
        assert!(!ledger.has_income());

        assert!(ledger.add_expense("Rent", f64::NAN).is_err());
        assert!(ledger.add_expense("Rent", f64::INFINITY).is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_negative_expense_rejected_and_state_kept() {
        let mut ledger = Ledger::new();
        ledger.add_expense("Rent", 500.0).unwrap();

        let err = ledger.add_expense("Food", -20.0).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidArgument {
                field: Field::ExpenseAmount,
                ..
            }
        ));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.total_expenses(), 500.0);
    }

    #[test]
    fn test_totals_and_balance() {
        let mut ledger = Ledger::new();
        ledger.set_income(1000.0).unwrap();
        ledger.add_expense("Rent", 500.0).unwrap();
        ledger.add_expense("Food", 200.0).unwrap();
        ledger.add_expense("Food", 50.0).unwrap();

        assert_eq!(ledger.total_expenses(), 750.0);
        assert_eq!(ledger.remaining_balance(), 250.0);
        // Duplicate categories are not merged
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_balance_can_go_negative() {
        let mut ledger = Ledger::new();
        ledger.set_income(1000.0).unwrap();
        ledger.add_expense("Rent", 1200.0).unwrap();
        assert_eq!(ledger.remaining_balance(), -200.0);
    }

    #[test]
    fn test_add_expense_keeps_previous_entries() {
        let mut ledger = Ledger::new();
        ledger.add_expense("Rent", 500.0).unwrap();
        let before = ledger.expenses()[0].clone();

        ledger.add_expense("Rent", 900.0).unwrap();
        ledger.add_expense("Food", 10.0).unwrap();

        assert_eq!(ledger.expenses()[0], before);
        assert_eq!(ledger.expenses()[1].amount(), 900.0);
        assert_eq!(ledger.expenses()[2].category(), "Food");
    }

    #[test]
    fn test_percentage_uses_current_income() {
        let mut ledger = Ledger::new();
        ledger.set_income(200.0).unwrap();
        ledger.add_expense("Food", 50.0).unwrap();
        let food = ledger.expenses()[0].clone();
        assert_eq!(ledger.percentage_of_income(&food), Some(25.0));

        ledger.set_income(0.0).unwrap();
        assert_eq!(ledger.percentage_of_income(&food), None);
    }

    #[test]
    fn test_total_overflow_rejected_and_state_kept() {
        let mut ledger = Ledger::new();
        ledger.set_income(1000.0).unwrap();
        ledger.add_expense("A", f64::MAX).unwrap();

        let err = ledger.add_expense("B", f64::MAX).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InvalidArgument {
                field: Field::ExpenseAmount,
                value: f64::MAX,
                reason: TOTAL_OVERFLOW,
            }
        );
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.total_expenses(), f64::MAX);
        assert!(ledger.remaining_balance().is_finite());
    }

    #[test]
    fn test_tiny_income_share_is_undefined() {
        let mut ledger = Ledger::new();
        ledger.set_income(1e-310).unwrap();
        ledger.add_expense("Rent", 1.0).unwrap();

        let rent = &ledger.expenses()[0];
        assert_eq!(ledger.percentage_of_income(rent), None);
    }
}
