//! Interactive console session: reads income and expenses line by line and
//! feeds them to a [`FinanceService`], re-prompting on bad input.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::application::{AppError, FinanceService};
use crate::domain::{Amount, parse_amount};

const INCOME_PROMPT: &str = "Enter your monthly income: ";
const CATEGORY_PROMPT: &str = "Enter expense category (or 'done' to finish): ";
const AMOUNT_PROMPT: &str = "Enter expense amount: ";
const INVALID_NUMBER: &str = "Invalid input. Please enter a valid number.";
const DONE: &str = "done";

/// Run the interactive flow against `service`.
///
/// Asks for the income, then for category/amount pairs until the user types
/// `done` (any case) or input ends. Returns the number of expenses recorded.
pub fn run_session<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    service: &mut FinanceService,
) -> Result<usize, AppError> {
    prompt_amount(&mut input, &mut output, INCOME_PROMPT, "income", |amount| {
        service.set_income(amount)
    })?;

    let mut recorded = 0;
    loop {
        write!(output, "{}", CATEGORY_PROMPT)?;
        output.flush()?;

        let Some(line) = read_line(&mut input)? else {
            debug!("input ended at category prompt");
            break;
        };
        let category = line.trim();
        if category.eq_ignore_ascii_case(DONE) {
            break;
        }

        let category = category.to_string();
        prompt_amount(
            &mut input,
            &mut output,
            AMOUNT_PROMPT,
            "expense amount",
            |amount| service.add_expense(category.clone(), amount),
        )?;
        recorded += 1;
    }

    Ok(recorded)
}

/// Prompt until `accept` takes a parsed amount. Unparseable lines and values
/// the ledger rejects are reported and asked again.
fn prompt_amount<R, W, F>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    what: &'static str,
    mut accept: F,
) -> Result<(), AppError>
where
    R: BufRead,
    W: Write,
    F: FnMut(Amount) -> Result<(), AppError>,
{
    loop {
        write!(output, "{}", prompt)?;
        output.flush()?;

        let line = read_line(input)?.ok_or(AppError::UnexpectedEof(what))?;
        let amount = match parse_amount(&line) {
            Ok(amount) => amount,
            Err(_) => {
                writeln!(output, "{}", INVALID_NUMBER)?;
                continue;
            }
        };

        match accept(amount) {
            Ok(()) => return Ok(()),
            Err(AppError::InvalidArgument(err)) => writeln!(output, "{}", err)?,
            Err(err) => return Err(err),
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>, AppError> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
}
