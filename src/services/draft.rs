//! Entry draft
//!
//! The in-progress text of one attendance row before it becomes a
//! `ServiceEntry`. Keystrokes are filtered through the partial validators so
//! a field never holds text that could not become valid.

use crate::models::{ReportingMonth, ServiceType};
use crate::validation;

/// Editable fields of an entry draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
    SheetNumber,
    Month,
    Year,
    Day,
    Members,
    Guests,
    Offerings,
    Notes,
}

impl EntryField {
    pub const ALL: [EntryField; 8] = [
        Self::SheetNumber,
        Self::Month,
        Self::Year,
        Self::Day,
        Self::Members,
        Self::Guests,
        Self::Offerings,
        Self::Notes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::SheetNumber => "Sheet Number",
            Self::Month => "Month",
            Self::Year => "Year",
            Self::Day => "Day",
            Self::Members => "Members",
            Self::Guests => "Guests",
            Self::Offerings => "Offerings",
            Self::Notes => "Notes",
        }
    }

    /// Whether `value` is an acceptable partial value for this field
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Self::SheetNumber => validation::sheet_number_partial(value),
            Self::Month => validation::month_partial(value),
            Self::Year => validation::year_partial(value),
            Self::Day => validation::day_partial(value),
            Self::Members | Self::Guests => validation::count_partial(value),
            Self::Offerings => validation::offerings_partial(value),
            Self::Notes => true,
        }
    }
}

/// Raw field values of the entry being typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub sheet_number: String,
    pub month: String,
    pub year: String,
    pub day: String,
    /// `None` until chosen; a fresh draft starts on Sunday
    pub service_type: Option<ServiceType>,
    pub members: String,
    pub guests: String,
    pub offerings: String,
    pub notes: String,
}

impl Default for EntryDraft {
    fn default() -> Self {
        Self::for_month(ReportingMonth::current())
    }
}

impl EntryDraft {
    /// A blank draft preset to the given month
    pub fn for_month(month: ReportingMonth) -> Self {
        Self {
            sheet_number: String::new(),
            month: month.month().to_string(),
            year: month.year().to_string(),
            day: String::new(),
            service_type: Some(ServiceType::Sunday),
            members: String::new(),
            guests: String::new(),
            offerings: String::new(),
            notes: String::new(),
        }
    }

    pub fn get(&self, field: EntryField) -> &str {
        match field {
            EntryField::SheetNumber => &self.sheet_number,
            EntryField::Month => &self.month,
            EntryField::Year => &self.year,
            EntryField::Day => &self.day,
            EntryField::Members => &self.members,
            EntryField::Guests => &self.guests,
            EntryField::Offerings => &self.offerings,
            EntryField::Notes => &self.notes,
        }
    }

    fn slot(&mut self, field: EntryField) -> &mut String {
        match field {
            EntryField::SheetNumber => &mut self.sheet_number,
            EntryField::Month => &mut self.month,
            EntryField::Year => &mut self.year,
            EntryField::Day => &mut self.day,
            EntryField::Members => &mut self.members,
            EntryField::Guests => &mut self.guests,
            EntryField::Offerings => &mut self.offerings,
            EntryField::Notes => &mut self.notes,
        }
    }

    /// Replace a field's text if the new value passes its keystroke filter
    ///
    /// Returns `false` and leaves the field unchanged otherwise.
    pub fn set_field(&mut self, field: EntryField, value: &str) -> bool {
        if !field.accepts(value) {
            return false;
        }
        *self.slot(field) = value.to_string();
        true
    }

    pub fn set_service_type(&mut self, service_type: Option<ServiceType>) {
        self.service_type = service_type;
    }

    /// Clear per-service fields after an entry was added
    ///
    /// Sheet number, month and year carry over to the next row.
    pub fn reset_after_add(&mut self) {
        self.day.clear();
        self.service_type = Some(ServiceType::Sunday);
        self.members.clear();
        self.guests.clear();
        self.offerings.clear();
        self.notes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> EntryDraft {
        EntryDraft::for_month(ReportingMonth::new(2025, 3).unwrap())
    }

    #[test]
    fn test_new_draft_defaults() {
        let d = draft();
        assert_eq!(d.month, "3");
        assert_eq!(d.year, "2025");
        assert_eq!(d.service_type, Some(ServiceType::Sunday));
        assert!(d.day.is_empty());
    }

    #[test]
    fn test_set_field_rejects_illegal_keystrokes() {
        let mut d = draft();
        assert!(d.set_field(EntryField::SheetNumber, "00"));
        assert!(d.set_field(EntryField::SheetNumber, "001"));
        assert!(!d.set_field(EntryField::SheetNumber, "0012"));
        assert_eq!(d.sheet_number, "001");

        assert!(d.set_field(EntryField::Day, "3"));
        assert!(!d.set_field(EntryField::Day, "32"));
        assert_eq!(d.day, "3");

        assert!(d.set_field(EntryField::Offerings, "120.5"));
        assert!(!d.set_field(EntryField::Offerings, "120.505"));
        assert_eq!(d.offerings, "120.5");

        assert!(!d.set_field(EntryField::Members, "4a"));
        assert!(d.set_field(EntryField::Notes, "Easter service!"));
    }

    #[test]
    fn test_reset_keeps_sheet_and_month() {
        let mut d = draft();
        d.set_field(EntryField::SheetNumber, "007");
        d.set_field(EntryField::Day, "12");
        d.set_field(EntryField::Members, "40");
        d.set_field(EntryField::Offerings, "10");
        d.set_service_type(Some(ServiceType::Midweek));

        d.reset_after_add();

        assert_eq!(d.sheet_number, "007");
        assert_eq!(d.month, "3");
        assert_eq!(d.year, "2025");
        assert!(d.day.is_empty());
        assert!(d.members.is_empty());
        assert!(d.offerings.is_empty());
        assert_eq!(d.service_type, Some(ServiceType::Sunday));
    }
}
