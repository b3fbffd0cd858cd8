//! Service attendance entry
//!
//! One row of the monthly sheet: a single Sunday or midweek service with its
//! member and guest counts and the offerings collected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::EntryId;
use super::money::Money;
use super::period::ReportingMonth;

/// Kind of service an entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ServiceType {
    #[default]
    #[serde(rename = "S")]
    Sunday,
    #[serde(rename = "M")]
    Midweek,
}

impl ServiceType {
    /// Single-letter code used on the paper sheet
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sunday => "S",
            Self::Midweek => "M",
        }
    }

    /// Flip between Sunday and midweek
    pub fn toggle(self) -> Self {
        match self {
            Self::Sunday => Self::Midweek,
            Self::Midweek => Self::Sunday,
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sunday => write!(f, "Sunday"),
            Self::Midweek => write!(f, "Midweek"),
        }
    }
}

impl FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "sunday" => Ok(Self::Sunday),
            "m" | "midweek" => Ok(Self::Midweek),
            other => Err(format!("Unknown service type: {}", other)),
        }
    }
}

/// A validated service entry held in a monthly ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    /// Unique identifier
    pub id: EntryId,

    /// Position in creation order within the ledger (1-based, never reused)
    pub sequence: u64,

    /// Three-digit sheet number, e.g. "001"
    pub sheet_number: String,

    /// Day of the month (1-31)
    pub day: u8,

    /// Month and year the service belongs to
    pub month: ReportingMonth,

    pub service_type: ServiceType,

    pub members: u32,

    pub guests: u32,

    pub offerings: Money,

    #[serde(default)]
    pub notes: String,

    pub district: String,

    pub congregation: String,

    /// When the entry was added to the ledger
    pub created_at: DateTime<Utc>,
}

impl ServiceEntry {
    /// Members plus guests
    pub fn total_attendance(&self) -> u64 {
        u64::from(self.members) + u64::from(self.guests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_type_codes() {
        assert_eq!(ServiceType::Sunday.code(), "S");
        assert_eq!(ServiceType::Midweek.code(), "M");
        assert_eq!(ServiceType::Sunday.toggle(), ServiceType::Midweek);
        assert_eq!("m".parse::<ServiceType>().unwrap(), ServiceType::Midweek);
        assert_eq!("Sunday".parse::<ServiceType>().unwrap(), ServiceType::Sunday);
        assert!("x".parse::<ServiceType>().is_err());
    }

    #[test]
    fn test_service_type_serializes_as_code() {
        assert_eq!(serde_json::to_string(&ServiceType::Midweek).unwrap(), "\"M\"");
    }

    #[test]
    fn test_total_attendance_is_derived() {
        let entry = ServiceEntry {
            id: EntryId::new(),
            sequence: 1,
            sheet_number: "001".into(),
            day: 5,
            month: ReportingMonth::new(2025, 1).unwrap(),
            service_type: ServiceType::Sunday,
            members: 40,
            guests: 5,
            offerings: Money::from_cents(12050),
            notes: String::new(),
            district: "North".into(),
            congregation: "Central".into(),
            created_at: Utc::now(),
        };
        assert_eq!(entry.total_attendance(), 45);
    }
}
