//! Machine-readable renderings of a submitted sheet
//!
//! - CSV: one row per entry plus a totals row (spreadsheet-compatible)
//! - JSON: the full snapshot with a schema version
//! - YAML: the same structure, human-readable
//! - Text: the plain-text monthly report

pub mod csv;
pub mod json;
pub mod yaml;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ReturnsError, ReturnsResult};
use crate::reports;
use crate::services::LedgerSnapshot;

pub use self::csv::export_sheet_csv;
pub use json::{export_sheet_json, import_sheet_json, SheetExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_sheet_yaml;

/// A file format a sheet report can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Csv,
    Json,
    Yaml,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    /// File name used for this format inside an outbox message
    pub fn file_name(&self) -> String {
        format!("report.{}", self.extension())
    }

    pub fn render(&self, snapshot: &LedgerSnapshot, currency_symbol: &str) -> ReturnsResult<Vec<u8>> {
        let mut out = Vec::new();
        match self {
            Self::Text => out.extend_from_slice(
                reports::monthly::render_text(snapshot, currency_symbol).as_bytes(),
            ),
            Self::Csv => export_sheet_csv(snapshot, &mut out)?,
            Self::Json => export_sheet_json(snapshot, &mut out, true)?,
            Self::Yaml => export_sheet_yaml(snapshot, &mut out)?,
        }
        Ok(out)
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ReportFormat {
    type Err = ReturnsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(ReturnsError::Config(format!("Unknown report format: {}", other))),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{LocationContext, ReportingMonth};
    use crate::services::{EntryDraft, EntryField, MonthlyLedger};

    /// Two entries for January 2025: 40/5/120.50 and 10/0/30.00
    pub(crate) fn sample_snapshot() -> LedgerSnapshot {
        let location = LocationContext::new("North District", "Central Church");
        let mut ledger = MonthlyLedger::new();
        for (day, members, guests, offerings) in [("5", "40", "5", "120.50"), ("12", "10", "0", "30.00")] {
            let mut draft = EntryDraft::for_month(ReportingMonth::new(2025, 1).unwrap());
            draft.set_field(EntryField::SheetNumber, "001");
            draft.set_field(EntryField::Day, day);
            draft.set_field(EntryField::Members, members);
            draft.set_field(EntryField::Guests, guests);
            draft.set_field(EntryField::Offerings, offerings);
            ledger.add_entry(&mut draft, &location).unwrap();
        }
        ledger.snapshot(&location).unwrap()
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<ReportFormat>().unwrap(), ReportFormat::Csv);
        assert_eq!("yml".parse::<ReportFormat>().unwrap(), ReportFormat::Yaml);
        assert!("pdf".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_render_every_format() {
        let snapshot = sample_snapshot();
        for format in [ReportFormat::Text, ReportFormat::Csv, ReportFormat::Json, ReportFormat::Yaml] {
            let bytes = format.render(&snapshot, "$").unwrap();
            let text = String::from_utf8(bytes).unwrap();
            assert!(text.contains("150.50"), "{format} output lacks the offerings total");
        }
    }
}
