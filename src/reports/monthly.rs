//! Monthly attendance report
//!
//! Plain-text rendering of a submitted sheet: title, one table row per
//! service, a totals row and a short summary. Used as the message body of
//! a delivery and printed by `returns sheet submit`.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{ServiceEntry, ServiceType};
use crate::services::{LedgerSnapshot, LedgerTotals};

/// One printed row of the monthly table
#[derive(Debug, Clone, Tabled)]
pub struct MonthlyRow {
    #[tabled(rename = "Sheet #")]
    pub sheet_number: String,
    #[tabled(rename = "Date")]
    pub day: String,
    #[tabled(rename = "Service")]
    pub service: String,
    #[tabled(rename = "Members")]
    pub members: String,
    #[tabled(rename = "Guests")]
    pub guests: String,
    #[tabled(rename = "Total")]
    pub total: String,
    #[tabled(rename = "Offerings")]
    pub offerings: String,
    #[tabled(rename = "Notes")]
    pub notes: String,
}

impl MonthlyRow {
    fn from_entry(entry: &ServiceEntry, symbol: &str) -> Self {
        Self {
            sheet_number: entry.sheet_number.clone(),
            day: entry.day.to_string(),
            service: match entry.service_type {
                ServiceType::Sunday => "Sunday (S)".into(),
                ServiceType::Midweek => "Midweek (M)".into(),
            },
            members: entry.members.to_string(),
            guests: entry.guests.to_string(),
            total: entry.total_attendance().to_string(),
            offerings: entry.offerings.format_with_symbol(symbol),
            notes: if entry.notes.is_empty() {
                "-".into()
            } else {
                entry.notes.clone()
            },
        }
    }

    fn totals(totals: &LedgerTotals, symbol: &str) -> Self {
        Self {
            sheet_number: "Monthly Totals".into(),
            day: String::new(),
            service: String::new(),
            members: totals.total_members.to_string(),
            guests: totals.total_guests.to_string(),
            total: totals.total_attendance.to_string(),
            offerings: totals.total_offerings.format_with_symbol(symbol),
            notes: String::new(),
        }
    }
}

/// Render the entries of a sheet as a table with a totals row
pub fn entries_table(entries: &[ServiceEntry], totals: &LedgerTotals, symbol: &str) -> String {
    let mut rows: Vec<MonthlyRow> = entries
        .iter()
        .map(|e| MonthlyRow::from_entry(e, symbol))
        .collect();
    rows.push(MonthlyRow::totals(totals, symbol));

    Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::new(3..7)).with(Alignment::right()))
        .to_string()
}

/// Full plain-text report for a submitted sheet
pub fn render_text(snapshot: &LedgerSnapshot, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Monthly Attendance Report: {}\n", snapshot.month));
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format!("District:     {}\n", snapshot.location.district));
    output.push_str(&format!("Congregation: {}\n", snapshot.location.congregation));
    output.push_str(&format!(
        "Sheet Numbers: {}\n\n",
        snapshot.sheet_numbers.join(", ")
    ));

    output.push_str(&entries_table(&snapshot.entries, &snapshot.totals, symbol));
    output.push_str("\n\n");

    let totals = &snapshot.totals;
    output.push_str(&format!("Total Entries:    {}\n", totals.entry_count));
    output.push_str(&format!(
        "Total Attendance: {} people\n",
        totals.total_attendance
    ));
    output.push_str(&format!(
        "Total Offerings:  {}\n",
        totals.total_offerings.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Submitted:        {}\n",
        snapshot.submitted_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

/// Message subject for a submitted sheet
pub fn subject(snapshot: &LedgerSnapshot) -> String {
    format!(
        "Monthly attendance {} - {}",
        snapshot.month, snapshot.location
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LocationContext, ReportingMonth};
    use crate::services::{EntryDraft, EntryField, MonthlyLedger};

    fn snapshot() -> LedgerSnapshot {
        let location = LocationContext::new("North District", "Central Church");
        let mut ledger = MonthlyLedger::new();
        for (day, members, guests, offerings, notes) in
            [("5", "40", "5", "120.50", "Communion"), ("12", "10", "0", "30.00", "")]
        {
            let mut draft = EntryDraft::for_month(ReportingMonth::new(2025, 1).unwrap());
            draft.set_field(EntryField::SheetNumber, "001");
            draft.set_field(EntryField::Day, day);
            draft.set_field(EntryField::Members, members);
            draft.set_field(EntryField::Guests, guests);
            draft.set_field(EntryField::Offerings, offerings);
            draft.set_field(EntryField::Notes, notes);
            ledger.add_entry(&mut draft, &location).unwrap();
        }
        ledger.snapshot(&location).unwrap()
    }

    #[test]
    fn test_render_text_contains_totals() {
        let text = render_text(&snapshot(), "$");
        assert!(text.contains("Monthly Attendance Report: January 2025"));
        assert!(text.contains("Central Church"));
        assert!(text.contains("Sheet #"));
        assert!(text.contains("Communion"));
        assert!(text.contains("Monthly Totals"));
        assert!(text.contains("$150.50"));
        assert!(text.contains("Total Attendance: 55 people"));
        assert!(text.contains("Total Entries:    2"));
    }

    #[test]
    fn test_subject_names_month_and_location() {
        assert_eq!(
            subject(&snapshot()),
            "Monthly attendance January 2025 - North District - Central Church"
        );
    }
}
