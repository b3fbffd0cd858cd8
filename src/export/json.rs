//! JSON export of a submitted sheet
//!
//! Wraps the snapshot with a schema version so downstream tooling can tell
//! formats apart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{ReturnsError, ReturnsResult};
use crate::services::LedgerSnapshot;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A snapshot as written to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub snapshot: LedgerSnapshot,
}

impl SheetExport {
    pub fn new(snapshot: &LedgerSnapshot) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            snapshot: snapshot.clone(),
        }
    }

    /// Check that the export was written by a compatible version
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }
        if self.snapshot.totals.entry_count != self.snapshot.entries.len() {
            return Err(format!(
                "Totals count {} entries but {} are present",
                self.snapshot.totals.entry_count,
                self.snapshot.entries.len()
            ));
        }
        Ok(())
    }
}

pub fn export_sheet_json<W: Write>(
    snapshot: &LedgerSnapshot,
    writer: &mut W,
    pretty: bool,
) -> ReturnsResult<()> {
    let export = SheetExport::new(snapshot);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| ReturnsError::Export(e.to_string()))?;

    Ok(())
}

/// Read back an export, checking its schema
pub fn import_sheet_json(json_str: &str) -> ReturnsResult<SheetExport> {
    let export: SheetExport =
        serde_json::from_str(json_str).map_err(|e| ReturnsError::Export(e.to_string()))?;
    export.validate().map_err(ReturnsError::Export)?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::sample_snapshot;

    #[test]
    fn test_export_can_be_read_back() {
        let snapshot = sample_snapshot();
        let mut out = Vec::new();
        export_sheet_json(&snapshot, &mut out, true).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"schema_version\": \"1.0.0\""));
        assert!(text.contains("\"total_offerings\": \"150.50\""));

        let back = import_sheet_json(&text).unwrap();
        assert_eq!(back.snapshot, snapshot);
    }

    #[test]
    fn test_import_rejects_other_schema() {
        let mut export = SheetExport::new(&sample_snapshot());
        export.schema_version = "0.1.0".into();
        let text = serde_json::to_string(&export).unwrap();
        assert!(import_sheet_json(&text).is_err());
    }
}
