//! Monthly ledger
//!
//! Holds the service entries of one sheet, in the order they were added, and
//! derives the monthly totals from them. Totals are never stored; every call
//! to `aggregate` recomputes them from the entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::{EntryId, LocationContext, Money, ReportingMonth, ServiceEntry};
use crate::validation;

use super::draft::EntryDraft;

/// Sums over every entry in a ledger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub total_members: u64,
    pub total_guests: u64,
    pub total_attendance: u64,
    pub total_offerings: Money,
    pub entry_count: usize,
}

/// Entries of one reporting month, in creation order
#[derive(Debug, Clone, Default)]
pub struct MonthlyLedger {
    entries: Vec<ServiceEntry>,
    next_sequence: u64,
}

impl MonthlyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ServiceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Month shared by every entry, `None` while the ledger is empty
    pub fn month(&self) -> Option<ReportingMonth> {
        self.entries.first().map(|e| e.month)
    }

    /// Validate the draft and append it as a new entry
    ///
    /// Checks run in the order the form reports them: location, sheet
    /// number, day, service type, then month and the numeric fields. On
    /// success the draft is reset for the next row.
    pub fn add_entry(
        &mut self,
        draft: &mut EntryDraft,
        location: &LocationContext,
    ) -> Result<ServiceEntry, ValidationError> {
        if !location.is_complete() {
            return Err(ValidationError::LocationIncomplete);
        }
        let sheet_number = validation::parse_sheet_number(&draft.sheet_number)?;
        let day = validation::parse_day(&draft.day)?;
        let service_type = draft
            .service_type
            .ok_or(ValidationError::ServiceTypeRequired)?;
        let month = validation::parse_reporting_month(&draft.month, &draft.year)?;
        let members = validation::parse_count("Members", &draft.members)?;
        let guests = validation::parse_count("Guests", &draft.guests)?;
        let offerings = validation::parse_offerings(&draft.offerings)?;

        if let Some(sheet_month) = self.month() {
            if sheet_month != month {
                return Err(ValidationError::MonthMismatch {
                    entry: month.to_string(),
                    sheet: sheet_month.to_string(),
                });
            }
        }

        self.aggregate()
            .total_offerings
            .checked_add(offerings)
            .ok_or(ValidationError::OfferingsTotalOverflow)?;

        self.next_sequence += 1;
        let location = location.trimmed();
        let entry = ServiceEntry {
            id: EntryId::new(),
            sequence: self.next_sequence,
            sheet_number,
            day,
            month,
            service_type,
            members,
            guests,
            offerings,
            notes: draft.notes.trim().to_string(),
            district: location.district,
            congregation: location.congregation,
            created_at: Utc::now(),
        };

        self.entries.push(entry.clone());
        draft.reset_after_add();
        Ok(entry)
    }

    /// Remove the entry with the given id; unknown ids are a no-op
    pub fn remove_entry(&mut self, id: EntryId) -> Option<ServiceEntry> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn aggregate(&self) -> LedgerTotals {
        self.entries
            .iter()
            .fold(LedgerTotals::default(), |mut totals, entry| {
                totals.total_members += u64::from(entry.members);
                totals.total_guests += u64::from(entry.guests);
                totals.total_attendance += entry.total_attendance();
                totals.total_offerings += entry.offerings;
                totals.entry_count += 1;
                totals
            })
    }

    /// Distinct sheet numbers in first-seen order
    pub fn sheet_numbers(&self) -> Vec<String> {
        let mut numbers: Vec<String> = Vec::new();
        for entry in &self.entries {
            if !numbers.contains(&entry.sheet_number) {
                numbers.push(entry.sheet_number.clone());
            }
        }
        numbers
    }

    /// Freeze the ledger into the payload handed to delivery
    pub fn snapshot(&self, location: &LocationContext) -> Result<LedgerSnapshot, ValidationError> {
        let month = self.month().ok_or(ValidationError::EmptyLedger)?;
        Ok(LedgerSnapshot {
            location: location.trimmed(),
            month,
            entries: self.entries.clone(),
            totals: self.aggregate(),
            sheet_numbers: self.sheet_numbers(),
            submitted_at: Utc::now(),
        })
    }
}

/// Everything a monthly sheet submission carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub location: LocationContext,
    pub month: ReportingMonth,
    pub entries: Vec<ServiceEntry>,
    pub totals: LedgerTotals,
    pub sheet_numbers: Vec<String>,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServiceType;
    use crate::services::draft::EntryField;

    fn location() -> LocationContext {
        LocationContext::new("North District", "Central Church")
    }

    fn draft(sheet: &str, day: &str, members: &str, guests: &str, offerings: &str) -> EntryDraft {
        let mut d = EntryDraft::for_month(ReportingMonth::new(2025, 1).unwrap());
        assert!(d.set_field(EntryField::SheetNumber, sheet));
        assert!(d.set_field(EntryField::Day, day));
        assert!(d.set_field(EntryField::Members, members));
        assert!(d.set_field(EntryField::Guests, guests));
        assert!(d.set_field(EntryField::Offerings, offerings));
        d
    }

    #[test]
    fn test_worked_example_totals() {
        let mut ledger = MonthlyLedger::new();
        let loc = location();

        ledger
            .add_entry(&mut draft("001", "5", "40", "5", "120.50"), &loc)
            .unwrap();
        let totals = ledger.aggregate();
        assert_eq!(totals.total_members, 40);
        assert_eq!(totals.total_guests, 5);
        assert_eq!(totals.total_attendance, 45);
        assert_eq!(totals.total_offerings, Money::from_cents(12050));
        assert_eq!(totals.entry_count, 1);

        ledger
            .add_entry(&mut draft("001", "12", "10", "0", "30.00"), &loc)
            .unwrap();
        let totals = ledger.aggregate();
        assert_eq!(totals.total_members, 50);
        assert_eq!(totals.total_guests, 5);
        assert_eq!(totals.total_attendance, 55);
        assert_eq!(totals.total_offerings.to_string(), "150.50");
        assert_eq!(totals.entry_count, 2);
    }

    #[test]
    fn test_oversized_offerings_never_reach_the_ledger() {
        let mut d = draft("001", "5", "40", "5", "");
        assert!(!d.set_field(EntryField::Offerings, "90000000000000000"));
        assert!(d.offerings.is_empty());

        // Text that bypassed the keystroke filter is still refused
        d.offerings = "90000000000000000".to_string();
        let mut ledger = MonthlyLedger::new();
        let err = ledger.add_entry(&mut d, &location()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OfferingsTooLarge("90000000000000000".into())
        );
        assert!(ledger.is_empty());

        for day in ["1", "2", "3"] {
            ledger
                .add_entry(&mut draft("001", day, "1", "0", "999999999.99"), &location())
                .unwrap();
        }
        assert_eq!(
            ledger.aggregate().total_offerings,
            Money::from_cents(3 * 99_999_999_999)
        );
    }

    #[test]
    fn test_entry_that_would_overflow_total_is_rejected() {
        let mut ledger = MonthlyLedger::new();
        let mut first = ledger
            .add_entry(&mut draft("001", "5", "1", "0", "1.00"), &location())
            .unwrap();
        first.offerings = Money::from_cents(i64::MAX - 50);
        ledger.entries[0] = first;

        let err = ledger
            .add_entry(&mut draft("001", "6", "1", "0", "1.00"), &location())
            .unwrap_err();
        assert_eq!(err, ValidationError::OfferingsTotalOverflow);
        assert_eq!(ledger.len(), 1);
        assert_eq!(
            ledger.aggregate().total_offerings,
            Money::from_cents(i64::MAX - 50)
        );
    }

    #[test]
    fn test_blank_counts_are_zero() {
        let mut ledger = MonthlyLedger::new();
        let entry = ledger
            .add_entry(&mut draft("002", "7", "", "", ""), &location())
            .unwrap();
        assert_eq!(entry.members, 0);
        assert_eq!(entry.guests, 0);
        assert!(entry.offerings.is_zero());
    }

    #[test]
    fn test_validation_order() {
        let mut ledger = MonthlyLedger::new();
        let mut d = draft("01", "", "1", "1", "1");

        assert_eq!(
            ledger.add_entry(&mut d, &LocationContext::default()),
            Err(ValidationError::LocationIncomplete)
        );
        assert_eq!(
            ledger.add_entry(&mut d, &location()),
            Err(ValidationError::SheetNumber)
        );
        d.set_field(EntryField::SheetNumber, "001");
        assert_eq!(
            ledger.add_entry(&mut d, &location()),
            Err(ValidationError::DayRequired)
        );
        d.set_field(EntryField::Day, "3");
        d.set_service_type(None);
        assert_eq!(
            ledger.add_entry(&mut d, &location()),
            Err(ValidationError::ServiceTypeRequired)
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_rejected_entry_leaves_ledger_and_draft_untouched() {
        let mut ledger = MonthlyLedger::new();
        let mut d = draft("001", "5", "40", "5", "120.50");
        let before = d.clone();
        assert!(ledger.add_entry(&mut d, &LocationContext::default()).is_err());
        assert_eq!(d, before);
        assert_eq!(ledger.aggregate(), LedgerTotals::default());
    }

    #[test]
    fn test_add_resets_draft_but_keeps_sheet_number() {
        let mut ledger = MonthlyLedger::new();
        let mut d = draft("004", "5", "40", "5", "1");
        d.set_service_type(Some(ServiceType::Midweek));
        ledger.add_entry(&mut d, &location()).unwrap();
        assert_eq!(d.sheet_number, "004");
        assert!(d.day.is_empty());
        assert_eq!(d.service_type, Some(ServiceType::Sunday));
    }

    #[test]
    fn test_entries_share_one_month() {
        let mut ledger = MonthlyLedger::new();
        ledger
            .add_entry(&mut draft("001", "5", "1", "0", ""), &location())
            .unwrap();

        let mut feb = draft("001", "6", "1", "0", "");
        feb.set_field(EntryField::Month, "2");
        assert!(matches!(
            ledger.add_entry(&mut feb, &location()),
            Err(ValidationError::MonthMismatch { .. })
        ));

        ledger.clear();
        assert!(ledger.add_entry(&mut feb, &location()).is_ok());
        assert_eq!(ledger.month(), Some(ReportingMonth::new(2025, 2).unwrap()));
    }

    #[test]
    fn test_remove_entry() {
        let mut ledger = MonthlyLedger::new();
        let first = ledger
            .add_entry(&mut draft("001", "5", "40", "5", "120.50"), &location())
            .unwrap();
        let second = ledger
            .add_entry(&mut draft("001", "12", "10", "0", "30.00"), &location())
            .unwrap();

        assert_eq!(ledger.remove_entry(first.id).map(|e| e.id), Some(first.id));
        assert!(ledger.remove_entry(first.id).is_none());
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.aggregate().total_offerings, Money::from_cents(3000));
        assert_eq!(ledger.entries()[0].id, second.id);
    }

    #[test]
    fn test_sequence_is_monotonic_and_never_reused() {
        let mut ledger = MonthlyLedger::new();
        let a = ledger
            .add_entry(&mut draft("001", "1", "1", "0", ""), &location())
            .unwrap();
        ledger.remove_entry(a.id);
        let b = ledger
            .add_entry(&mut draft("001", "2", "1", "0", ""), &location())
            .unwrap();
        assert!(b.sequence > a.sequence);
    }

    #[test]
    fn test_totals_match_entry_sums_after_mixed_operations() {
        let mut ledger = MonthlyLedger::new();
        let mut ids = Vec::new();
        for day in 1..=10u32 {
            let entry = ledger
                .add_entry(
                    &mut draft("003", &day.to_string(), &(day * 3).to_string(), &day.to_string(), "2.25"),
                    &location(),
                )
                .unwrap();
            ids.push(entry.id);
        }
        for id in ids.iter().step_by(3) {
            ledger.remove_entry(*id);
        }

        let totals = ledger.aggregate();
        let members: u64 = ledger.entries().iter().map(|e| u64::from(e.members)).sum();
        let guests: u64 = ledger.entries().iter().map(|e| u64::from(e.guests)).sum();
        let offerings: Money = ledger.entries().iter().map(|e| e.offerings).sum();
        assert_eq!(totals.total_members, members);
        assert_eq!(totals.total_guests, guests);
        assert_eq!(totals.total_attendance, members + guests);
        assert_eq!(totals.total_offerings, offerings);
        assert_eq!(totals.entry_count, ledger.len());
    }

    #[test]
    fn test_snapshot() {
        let mut ledger = MonthlyLedger::new();
        assert_eq!(
            ledger.snapshot(&location()),
            Err(ValidationError::EmptyLedger)
        );
        ledger
            .add_entry(&mut draft("002", "5", "4", "1", "1"), &location())
            .unwrap();
        ledger
            .add_entry(&mut draft("001", "6", "4", "1", "1"), &location())
            .unwrap();
        ledger
            .add_entry(&mut draft("002", "7", "4", "1", "1"), &location())
            .unwrap();

        let snapshot = ledger.snapshot(&location()).unwrap();
        assert_eq!(snapshot.sheet_numbers, vec!["002", "001"]);
        assert_eq!(snapshot.totals.entry_count, 3);
        assert_eq!(snapshot.month.to_string(), "January 2025");
    }
}
