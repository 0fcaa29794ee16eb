use crate::domain::{Recommendation, Summary, format_amount, format_percentage};

pub const CURRENCY_SYMBOL: &str = "$";

const OVERSPENDING_WARNING: &str = "Warning: You are overspending. Consider reducing expenses.";

fn money(amount: f64) -> String {
    format!("{}{}", CURRENCY_SYMBOL, format_amount(amount))
}

/// Render a summary as the plain-text financial report.
pub fn render_summary(summary: &Summary) -> String {
    let mut lines = vec![
        "Financial Summary:".to_string(),
        format!("Income: {}", money(summary.income)),
        format!("Total Expenses: {}", money(summary.total_expenses)),
        format!("Remaining Balance: {}", money(summary.remaining_balance)),
        String::new(),
        "Expense Breakdown:".to_string(),
    ];

    lines.extend(summary.breakdown.iter().map(|entry| {
        format!(
            "{}: {} ({})",
            entry.category,
            money(entry.amount),
            format_percentage(entry.percentage)
        )
    }));

    lines.push(String::new());
    lines.push(match &summary.recommendation {
        Recommendation::Save { amount } => format!("Recommended Savings: {}", money(*amount)),
        Recommendation::Overspending => OVERSPENDING_WARNING.to_string(),
    });

    if let Some(advisory) = &summary.high_spending {
        lines.push(format!(
            "Consider reducing spending on {} as it accounts for a large portion of your income.",
            advisory.category
        ));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Ledger;

    #[test]
    fn test_render_savings_with_advisory() {
        let mut ledger = Ledger::new();
        ledger.set_income(1000.0).unwrap();
        ledger.add_expense("Food", 200.0).unwrap();
        ledger.add_expense("Rent", 500.0).unwrap();

        let expected = "\
Financial Summary:
Income: $1000.00
Total Expenses: $700.00
Remaining Balance: $300.00

Expense Breakdown:
Rent: $500.00 (50.00%)
Food: $200.00 (20.00%)

Recommended Savings: $60.00
Consider reducing spending on Rent as it accounts for a large portion of your income.
";
        assert_eq!(render_summary(&ledger.build_summary()), expected);
    }

    #[test]
    fn test_render_overspending() {
        let mut ledger = Ledger::new();
        ledger.set_income(1000.0).unwrap();
        ledger.add_expense("Groceries", 300.0).unwrap();
        ledger.add_expense("Car", 800.0).unwrap();

        let report = render_summary(&ledger.build_summary());
        assert!(report.contains("Remaining Balance: $-100.00\n"));
        assert!(report.contains("Groceries: $300.00 (30.00%)\n"));
        assert!(report.contains("Warning: You are overspending. Consider reducing expenses.\n"));
        assert!(!report.contains("Recommended Savings"));
        assert!(report.contains("Consider reducing spending on Car"));
    }

    #[test]
    fn test_render_zero_income() {
        let mut ledger = Ledger::new();
        ledger.set_income(0.0).unwrap();
        ledger.add_expense("Snacks", 5.0).unwrap();

        let report = render_summary(&ledger.build_summary());
        assert!(report.contains("Income: $0.00\n"));
        assert!(report.contains("Snacks: $5.00 (n/a)\n"));
        assert!(!report.contains("Consider reducing spending on"));
    }

    #[test]
    fn test_render_tiny_income_has_no_infinite_share() {
        let mut ledger = Ledger::new();
        ledger.set_income(1e-310).unwrap();
        ledger.add_expense("Rent", 1.0).unwrap();

        let report = render_summary(&ledger.build_summary());
        assert!(report.contains("Rent: $1.00 (n/a)\n"));
        assert!(!report.contains("inf"));
        assert!(!report.contains("Consider reducing spending on"));
    }
}
