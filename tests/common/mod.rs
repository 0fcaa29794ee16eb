// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use summa::FinanceService;

/// Helper to create a service with income and expenses already recorded
pub fn service_with(income: f64, expenses: &[(&str, f64)]) -> Result<FinanceService> {
    let mut service = FinanceService::new();
    service.set_income(income)?;
    for (category, amount) in expenses {
        service.add_expense(*category, *amount)?;
    }
    Ok(service)
}

/// Test fixture: a typical month
pub struct StandardMonth;

impl StandardMonth {
    pub const INCOME: f64 = 3000.0;

    pub fn expenses() -> Vec<(&'static str, f64)> {
        vec![
            ("Groceries", 450.0),
            ("Rent", 1100.0),
            ("Utilities", 180.0),
            ("Dining", 220.0),
            ("Transport", 180.0),
        ]
    }

    pub fn service() -> Result<FinanceService> {
        service_with(Self::INCOME, &Self::expenses())
    }
}

/// Compare floats produced by currency arithmetic
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
