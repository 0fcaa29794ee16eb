use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Amount, Ledger};

pub const DEFAULT_SAVINGS_RATE: f64 = 0.2;
pub const DEFAULT_HIGH_SPENDING_THRESHOLD: f64 = 30.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolicyError {
    #[error("Invalid savings rate: {0} (must be between 0 and 1)")]
    SavingsRate(f64),

    #[error("Invalid high-spending threshold: {0} (must be a non-negative percentage)")]
    Threshold(f64),
}

/// Knobs for the recommendation rules. Only built through `new` or `default`,
/// so both values are always in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryPolicy {
    savings_rate: f64,
    high_spending_threshold: f64,
}

impl SummaryPolicy {
    pub fn new(savings_rate: f64, high_spending_threshold: f64) -> Result<Self, PolicyError> {
        if !(0.0..=1.0).contains(&savings_rate) {
            return Err(PolicyError::SavingsRate(savings_rate));
        }
        if !high_spending_threshold.is_finite() || high_spending_threshold < 0.0 {
            return Err(PolicyError::Threshold(high_spending_threshold));
        }
        Ok(Self {
            savings_rate,
            high_spending_threshold,
        })
    }

    /// Fraction of a positive remaining balance recommended for savings.
    pub fn savings_rate(&self) -> f64 {
        self.savings_rate
    }

    /// Percentage of income above which the largest expense gets flagged.
    pub fn high_spending_threshold(&self) -> f64 {
        self.high_spending_threshold
    }
}

impl Default for SummaryPolicy {
    fn default() -> Self {
        Self {
            savings_rate: DEFAULT_SAVINGS_RATE,
            high_spending_threshold: DEFAULT_HIGH_SPENDING_THRESHOLD,
        }
    }
}

/// One line of the expense breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub category: String,
    pub amount: Amount,
    /// Share of income in percent; `None` when income is zero.
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recommendation {
    /// Remaining balance is positive; set aside this much.
    Save { amount: Amount },
    /// Expenses meet or exceed income.
    Overspending,
}

impl Recommendation {
    pub fn savings(&self) -> Option<Amount> {
        match self {
            Recommendation::Save { amount } => Some(*amount),
            Recommendation::Overspending => None,
        }
    }

    pub fn is_overspending(&self) -> bool {
        matches!(self, Recommendation::Overspending)
    }
}

/// Raised when the single largest expense takes more than the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighSpendingAdvisory {
    pub category: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub income: Amount,
    pub total_expenses: Amount,
    pub remaining_balance: Amount,
    /// Expenses sorted by descending share of income, ties in insertion order.
    pub breakdown: Vec<BreakdownEntry>,
    pub recommendation: Recommendation,
    pub high_spending: Option<HighSpendingAdvisory>,
}

impl Summary {
    pub(crate) fn build(ledger: &Ledger, policy: &SummaryPolicy) -> Self {
        let remaining_balance = ledger.remaining_balance();
        let breakdown = sorted_breakdown(ledger);

        let recommendation = if remaining_balance > 0.0 {
            Recommendation::Save {
                amount: remaining_balance * policy.savings_rate(),
            }
        } else {
            Recommendation::Overspending
        };

        // Only the top entry is checked; same-named categories are not summed.
        let high_spending = breakdown.first().and_then(|top| match top.percentage {
            Some(p) if p > policy.high_spending_threshold() => Some(HighSpendingAdvisory {
                category: top.category.clone(),
                percentage: p,
            }),
            _ => None,
        });

        Self {
            income: ledger.income(),
            total_expenses: ledger.total_expenses(),
            remaining_balance,
            breakdown,
            recommendation,
            high_spending,
        }
    }
}

/// Copy of the ledger's expenses ordered by descending share of income.
/// `sort_by` is stable, so equal shares keep insertion order.
fn sorted_breakdown(ledger: &Ledger) -> Vec<BreakdownEntry> {
    let mut entries: Vec<BreakdownEntry> = ledger
        .expenses()
        .iter()
        .map(|e| BreakdownEntry {
            category: e.category().to_string(),
            amount: e.amount(),
            percentage: ledger.percentage_of_income(e),
        })
        .collect();

    entries.sort_by(|a, b| compare_share(b.percentage, a.percentage));
    entries
}

// With a single income every share is either defined or undefined, but keep
// undefined shares after defined ones so the order is total anyway.
fn compare_share(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
