//! CSV export of a submitted sheet
//!
//! One row per service entry followed by a totals row, in the column order
//! of the paper form.

use std::io::Write;

use crate::error::{ReturnsError, ReturnsResult};
use crate::services::LedgerSnapshot;

const HEADER: [&str; 13] = [
    "Sheet Number",
    "Month",
    "Year",
    "Day",
    "Service Type",
    "Members",
    "Guests",
    "Total",
    "Offerings",
    "Notes",
    "District",
    "Congregation",
    "Entry ID",
];

pub fn export_sheet_csv<W: Write>(snapshot: &LedgerSnapshot, writer: W) -> ReturnsResult<()> {
    let err = |e: csv::Error| ReturnsError::Export(e.to_string());
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(HEADER).map_err(err)?;

    for entry in &snapshot.entries {
        wtr.write_record([
            entry.sheet_number.clone(),
            entry.month.month().to_string(),
            entry.month.year().to_string(),
            entry.day.to_string(),
            entry.service_type.code().to_string(),
            entry.members.to_string(),
            entry.guests.to_string(),
            entry.total_attendance().to_string(),
            entry.offerings.to_string(),
            entry.notes.clone(),
            entry.district.clone(),
            entry.congregation.clone(),
            entry.id.to_string(),
        ])
        .map_err(err)?;
    }

    let totals = &snapshot.totals;
    wtr.write_record([
        "TOTAL".to_string(),
        snapshot.month.month().to_string(),
        snapshot.month.year().to_string(),
        String::new(),
        String::new(),
        totals.total_members.to_string(),
        totals.total_guests.to_string(),
        totals.total_attendance.to_string(),
        totals.total_offerings.to_string(),
        format!("{} entries", totals.entry_count),
        snapshot.location.district.clone(),
        snapshot.location.congregation.clone(),
        String::new(),
    ])
    .map_err(err)?;

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::sample_snapshot;

    #[test]
    fn test_csv_rows_and_totals() {
        let mut out = Vec::new();
        export_sheet_csv(&sample_snapshot(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Sheet Number,Month,Year,Day"));
        assert!(lines[1].starts_with("001,1,2025,5,S,40,5,45,120.50"));
        assert!(lines[3].starts_with("TOTAL,1,2025,,,50,5,55,150.50,2 entries"));
    }
}
