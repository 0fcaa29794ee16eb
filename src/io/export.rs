use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::domain::{Summary, format_amount};

/// Summary snapshot for JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarySnapshot {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub summary: Summary,
}

/// Exporter for writing a summary in machine-readable formats
pub struct Exporter<'a> {
    summary: &'a Summary,
}

impl<'a> Exporter<'a> {
    pub fn new(summary: &'a Summary) -> Self {
        Self { summary }
    }

    /// Export the expense breakdown to CSV format
    pub fn export_breakdown_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["category", "amount", "percentage"])?;

        let mut count = 0;
        for entry in &self.summary.breakdown {
            let amount = format_amount(entry.amount);
            // Undefined shares are left empty
            let percentage = entry
                .percentage
                .map(|p| format!("{:.2}", p))
                .unwrap_or_default();

            csv_writer.write_record([
                entry.category.as_str(),
                amount.as_str(),
                percentage.as_str(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the full summary as a JSON snapshot
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<SummarySnapshot> {
        let snapshot = SummarySnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            summary: self.summary.clone(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(snapshot)
    }
}
