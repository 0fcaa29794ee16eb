use anyhow::Result;
use std::io::Read;
use tracing::debug;

use crate::application::FinanceService;
use crate::domain::parse_amount;

/// Result of an import operation
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<ImportError>,
}

/// Error that occurred during import
#[derive(Debug, Clone)]
pub struct ImportError {
    pub line: usize,
    pub field: Option<String>,
    pub error: String,
}

/// Options for import operations
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Validate every row without recording anything
    pub dry_run: bool,
}

/// Importer for loading expenses into a service
pub struct Importer<'a> {
    service: &'a mut FinanceService,
}

impl<'a> Importer<'a> {
    pub fn new(service: &'a mut FinanceService) -> Self {
        Self { service }
    }

    /// Import expenses from a `category,amount` CSV with a header row.
    /// Bad rows are collected in the result and skipped.
    pub fn import_expenses_csv<R: Read>(
        &mut self,
        reader: R,
        options: ImportOptions,
    ) -> Result<ImportResult> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Fields)
            .from_reader(reader);
        let mut result = ImportResult::default();

        for (line_num, record) in csv_reader.records().enumerate() {
            let line = line_num + 2; // +2 for header and 0-indexing

            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    result.errors.push(ImportError {
                        line,
                        field: None,
                        error: format!("CSV parse error: {}", e),
                    });
                    result.skipped += 1;
                    continue;
                }
            };

            let category = record.get(0).unwrap_or("");
            let amount_str = record.get(1).unwrap_or("");

            let amount = match parse_amount(amount_str) {
                Ok(a) => a,
                Err(e) => {
                    result.errors.push(ImportError {
                        line,
                        field: Some("amount".to_string()),
                        error: format!("Invalid amount: {}", e),
                    });
                    result.skipped += 1;
                    continue;
                }
            };

            if options.dry_run {
                if amount < 0.0 {
                    result.errors.push(ImportError {
                        line,
                        field: Some("amount".to_string()),
                        error: format!("Invalid amount: {} is negative", amount_str),
                    });
                    result.skipped += 1;
                } else {
                    result.imported += 1;
                }
                continue;
            }

            match self.service.add_expense(category, amount) {
                Ok(()) => result.imported += 1,
                Err(e) => {
                    result.errors.push(ImportError {
                        line,
                        field: Some("amount".to_string()),
                        error: e.to_string(),
                    });
                    result.skipped += 1;
                }
            }
        }

        debug!(
            imported = result.imported,
            skipped = result.skipped,
            dry_run = options.dry_run,
            "expense import finished"
        );
        Ok(result)
    }
}
