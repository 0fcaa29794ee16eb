use std::fmt;

/// Money is a plain amount of currency units. Only finite values are ever
/// stored in a ledger.
pub type Amount = f64;

/// Format an amount with two decimals.
/// Example: 1000.0 -> "1000.00", -200.0 -> "-200.00"
pub fn format_amount(amount: Amount) -> String {
    // Avoid rendering "-0.00" for tiny negative rounding residue.
    let rounded = (amount * 100.0).round() / 100.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.2}", rounded)
}

/// Format a percentage with two decimals, or "n/a" when it is undefined.
pub fn format_percentage(percentage: Option<f64>) -> String {
    match percentage {
        Some(p) => format!("{:.2}%", p),
        None => "n/a".to_string(),
    }
}

/// Parse a decimal string into an amount.
/// Example: "50.00" -> 50.0, "12.5" -> 12.5, "-3" -> -3.0
///
/// Sign is not checked here; the ledger decides what it accepts.
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let value: f64 = input
        .parse()
        .map_err(|_| ParseAmountError::InvalidFormat(input.to_string()))?;

    if !value.is_finite() {
        return Err(ParseAmountError::NotFinite(input.to_string()));
    }

    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat(String),
    NotFinite(String),
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "empty amount"),
            ParseAmountError::InvalidFormat(s) => write!(f, "invalid money format: '{}'", s),
            ParseAmountError::NotFinite(s) => write!(f, "amount is not a finite number: '{}'", s),
        }
    }
}

impl std::error::Error for ParseAmountError {}
