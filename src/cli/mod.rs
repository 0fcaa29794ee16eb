pub mod prompt;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, Write};
use tracing::info;

use crate::application::{FinanceService, render_summary};
use crate::domain::{
    Amount, DEFAULT_HIGH_SPENDING_THRESHOLD, DEFAULT_SAVINGS_RATE, SummaryPolicy, parse_amount,
};
use crate::io::{Exporter, ImportOptions, Importer};
use crate::logging;

/// Summa - monthly income and expense summarizer
#[derive(Parser)]
#[command(name = "summa")]
#[command(about = "Summarize a monthly income against categorized expenses")]
#[command(version)]
pub struct Cli {
    /// Monthly income (e.g., "2500" or "2500.00"); prompts interactively when omitted
    #[arg(long)]
    pub income: Option<String>,

    /// Expense as CATEGORY=AMOUNT (repeatable, e.g. -e Rent=900)
    #[arg(short, long = "expense", value_name = "CATEGORY=AMOUNT")]
    pub expenses: Vec<String>,

    /// CSV file with a `category,amount` header to load expenses from
    #[arg(long)]
    pub expenses_file: Option<String>,

    /// Output format: text, json, csv
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Fraction of a positive balance recommended for savings
    #[arg(long, default_value_t = DEFAULT_SAVINGS_RATE)]
    pub savings_rate: f64,

    /// Share of income (percent) above which the top expense is flagged
    #[arg(long, default_value_t = DEFAULT_HIGH_SPENDING_THRESHOLD)]
    pub threshold: f64,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Report formats accepted by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "csv" => Some(OutputFormat::Csv),
            _ => None,
        }
    }

    /// JSON and CSV must stay parseable, so nothing else may share their stream.
    pub fn is_machine_readable(&self) -> bool {
        !matches!(self, OutputFormat::Text)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Cli {
    pub fn run(self) -> Result<()> {
        logging::init_tracing(self.verbose);

        let format = self.output_format()?;

        let writer: Box<dyn Write> = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path))?;
                Box::new(file)
            }
            None => Box::new(io::stdout()),
        };

        // Interactive prompts go to stderr when stdout carries JSON or CSV
        let prompts: Box<dyn Write> = if format.is_machine_readable() {
            Box::new(io::stderr())
        } else {
            Box::new(io::stdout())
        };

        let stdin = io::stdin();
        self.execute(stdin.lock(), prompts, writer)
    }

    pub fn output_format(&self) -> Result<OutputFormat> {
        OutputFormat::from_str(&self.format).with_context(|| {
            format!(
                "Invalid format '{}'. Valid formats: text, json, csv",
                self.format
            )
        })
    }

    /// Collect income and expenses, then write the report to `output`.
    ///
    /// `input` and `prompts` are only used by the interactive session, which
    /// runs when `--income` was not given.
    pub fn execute<R: BufRead, P: Write, W: Write>(
        &self,
        input: R,
        mut prompts: P,
        mut output: W,
    ) -> Result<()> {
        let format = self.output_format()?;
        let policy = SummaryPolicy::new(self.savings_rate, self.threshold)?;
        let mut service = FinanceService::with_policy(policy);

        if let Some(path) = &self.expenses_file {
            import_expenses(&mut service, path)?;
        }

        for arg in &self.expenses {
            let (category, amount) = parse_expense_arg(arg)?;
            service
                .add_expense(category, amount)
                .with_context(|| format!("Invalid expense '{}'", arg))?;
        }

        match &self.income {
            Some(income) => {
                let income =
                    parse_amount(income).context("Invalid income format. Use '2500.00' or '2500'")?;
                service.set_income(income)?;
            }
            None => {
                let recorded = prompt::run_session(input, &mut prompts, &mut service)?;
                info!(recorded, "interactive session finished");
                writeln!(prompts)?;
                prompts.flush()?;
            }
        }

        let summary = service.summary()?;
        let exporter = Exporter::new(&summary);
        match format {
            OutputFormat::Text => {
                output.write_all(render_summary(&summary).as_bytes())?;
                output.flush()?;
            }
            OutputFormat::Json => {
                exporter.export_json(output)?;
            }
            OutputFormat::Csv => {
                let count = exporter.export_breakdown_csv(output)?;
                if self.output.is_some() {
                    eprintln!("Exported {} expenses", count);
                }
            }
        }

        Ok(())
    }
}

fn import_expenses(service: &mut FinanceService, path: &str) -> Result<()> {
    let file = File::open(path).with_context(|| format!("Failed to open input file: {}", path))?;
    let result = Importer::new(service).import_expenses_csv(file, ImportOptions::default())?;

    if !result.errors.is_empty() {
        eprintln!(
            "Imported {} expenses, skipped {}:",
            result.imported, result.skipped
        );
        for error in result.errors.iter().take(10) {
            eprintln!(
                "  Line {}: {}",
                error.line,
                error
                    .field
                    .as_ref()
                    .map(|f| format!("{}: ", f))
                    .unwrap_or_default()
                    + &error.error
            );
        }
        if result.errors.len() > 10 {
            eprintln!("  ... and {} more errors", result.errors.len() - 10);
        }
    }

    Ok(())
}

/// Split a `CATEGORY=AMOUNT` argument at its last `=`.
pub fn parse_expense_arg(arg: &str) -> Result<(String, Amount)> {
    let (category, amount) = arg
        .rsplit_once('=')
        .with_context(|| format!("Invalid expense '{}'. Use CATEGORY=AMOUNT", arg))?;
    let amount = parse_amount(amount)
        .with_context(|| format!("Invalid amount in expense '{}'", arg))?;
    Ok((category.trim().to_string(), amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expense_arg() {
        let (category, amount) = parse_expense_arg("Rent=900").unwrap();
        assert_eq!(category, "Rent");
        assert_eq!(amount, 900.0);

        let (category, amount) = parse_expense_arg("a=b=12.5").unwrap();
        assert_eq!(category, "a=b");
        assert_eq!(amount, 12.5);
    }

    #[test]
    fn test_parse_expense_arg_invalid() {
        assert!(parse_expense_arg("Rent").is_err());
        assert!(parse_expense_arg("Rent=lots").is_err());
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "summa",
            "--income",
            "1000",
            "-e",
            "Rent=500",
            "--expense",
            "Food=200",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.income.as_deref(), Some("1000"));
        assert_eq!(cli.expenses, vec!["Rent=500", "Food=200"]);
        assert_eq!(cli.format, "json");
        assert_eq!(cli.savings_rate, DEFAULT_SAVINGS_RATE);
        assert_eq!(cli.threshold, DEFAULT_HIGH_SPENDING_THRESHOLD);
        assert_eq!(cli.output_format().unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_output_format_roundtrip() {
        for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Csv] {
            assert_eq!(OutputFormat::from_str(format.as_str()), Some(format));
        }
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("xml"), None);
    }

    #[test]
    fn test_only_text_shares_stdout_with_prompts() {
        assert!(!OutputFormat::Text.is_machine_readable());
        assert!(OutputFormat::Json.is_machine_readable());
        assert!(OutputFormat::Csv.is_machine_readable());
    }
}
