//! YAML export of a submitted sheet

use std::io::Write;

use crate::error::{ReturnsError, ReturnsResult};
use crate::export::json::SheetExport;
use crate::services::LedgerSnapshot;

pub fn export_sheet_yaml<W: Write>(snapshot: &LedgerSnapshot, writer: &mut W) -> ReturnsResult<()> {
    let export = SheetExport::new(snapshot);
    let err = |e: std::io::Error| ReturnsError::Export(e.to_string());

    writeln!(writer, "# Monthly attendance report").map_err(err)?;
    writeln!(
        writer,
        "# {} / {} / {}",
        snapshot.month, snapshot.location.district, snapshot.location.congregation
    )
    .map_err(err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(err)?;
    writeln!(writer).map_err(err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| ReturnsError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::sample_snapshot;

    #[test]
    fn test_yaml_has_header_and_totals() {
        let mut out = Vec::new();
        export_sheet_yaml(&sample_snapshot(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("# Monthly attendance report"));
        assert!(text.contains("total_attendance: 55"));
        assert!(text.contains("congregation: Central Church"));
    }
}
