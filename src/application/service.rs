use tracing::{debug, info, warn};

use crate::domain::{Amount, Ledger, Summary, SummaryPolicy};

use super::AppError;

/// Application service providing high-level operations over a ledger.
/// This is the primary interface for any client (CLI, prompt, importer).
#[derive(Debug, Clone, Default)]
pub struct FinanceService {
    ledger: Ledger,
    policy: SummaryPolicy,
}

impl FinanceService {
    /// Create a service with an empty ledger and the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: SummaryPolicy) -> Self {
        Self {
            ledger: Ledger::new(),
            policy,
        }
    }

    pub fn policy(&self) -> &SummaryPolicy {
        &self.policy
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Set (or replace) the monthly income.
    pub fn set_income(&mut self, value: Amount) -> Result<(), AppError> {
        if let Err(err) = self.ledger.set_income(value) {
            warn!(value, "rejected income");
            return Err(err.into());
        }
        debug!(income = value, "income set");
        Ok(())
    }

    /// Record an expense under `category`.
    pub fn add_expense(
        &mut self,
        category: impl Into<String>,
        amount: Amount,
    ) -> Result<(), AppError> {
        let category = category.into();
        if let Err(err) = self.ledger.add_expense(category.as_str(), amount) {
            warn!(category = category.as_str(), amount, "rejected expense");
            return Err(err.into());
        }
        debug!(category = category.as_str(), amount, "expense recorded");
        Ok(())
    }

    /// Build the financial summary. Income must have been set first.
    pub fn summary(&self) -> Result<Summary, AppError> {
        if !self.ledger.has_income() {
            return Err(AppError::IncomeNotSet);
        }

        let summary = self.ledger.build_summary_with(&self.policy);
        info!(
            income = summary.income,
            total_expenses = summary.total_expenses,
            remaining_balance = summary.remaining_balance,
            expenses = summary.breakdown.len(),
            "summary built"
        );
        if summary.income == 0.0 && !summary.breakdown.is_empty() {
            warn!("income is zero; expense shares are undefined");
        }
        Ok(summary)
    }
}
