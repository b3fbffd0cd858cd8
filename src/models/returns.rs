//! Return request model
//!
//! A customer return filed with supporting documents.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::attachment::Attachment;
use super::ids::ReturnId;

/// Why an item is being returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReturnReason {
    #[default]
    Defective,
    WrongItem,
    Damaged,
    #[serde(rename = "size")]
    SizeColor,
    #[serde(rename = "change-mind")]
    ChangeOfMind,
    Other,
}

impl ReturnReason {
    pub const ALL: [ReturnReason; 6] = [
        Self::Defective,
        Self::WrongItem,
        Self::Damaged,
        Self::SizeColor,
        Self::ChangeOfMind,
        Self::Other,
    ];

    /// Cycle to the next reason (wraps around)
    pub fn next(self) -> Self {
        let pos = Self::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ReturnReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Defective => "Defective Product",
            Self::WrongItem => "Wrong Item Received",
            Self::Damaged => "Damaged During Shipping",
            Self::SizeColor => "Size/Color Incorrect",
            Self::ChangeOfMind => "Change of Mind",
            Self::Other => "Other",
        };
        write!(f, "{}", label)
    }
}

/// How quickly the return should be handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl Urgency {
    pub const ALL: [Urgency; 4] = [Self::Low, Self::Normal, Self::High, Self::Urgent];

    /// Cycle to the next urgency level (wraps around)
    pub fn next(self) -> Self {
        let pos = Self::ALL.iter().position(|u| *u == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "Low Priority",
            Self::Normal => "Normal",
            Self::High => "High Priority",
            Self::Urgent => "Urgent",
        };
        write!(f, "{}", label)
    }
}

/// A validated return request ready for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnRequest {
    pub id: ReturnId,
    pub return_date: NaiveDate,
    pub customer_name: String,
    pub order_number: String,
    pub customer_email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub customer_phone: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub product_sku: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub product_name: String,
    pub quantity: u32,
    pub reason: ReturnReason,
    pub urgency: Urgency,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
}

impl ReturnRequest {
    pub fn attachments_total_bytes(&self) -> u64 {
        self.attachments.iter().map(|a| a.size_bytes).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_cycles() {
        let mut reason = ReturnReason::default();
        for _ in 0..ReturnReason::ALL.len() {
            reason = reason.next();
        }
        assert_eq!(reason, ReturnReason::Defective);
        assert_eq!(ReturnReason::Defective.next(), ReturnReason::WrongItem);
    }

    #[test]
    fn test_reason_wire_names() {
        assert_eq!(
            serde_json::to_string(&ReturnReason::ChangeOfMind).unwrap(),
            "\"change-mind\""
        );
        assert_eq!(
            serde_json::to_string(&ReturnReason::WrongItem).unwrap(),
            "\"wrong-item\""
        );
        assert_eq!(serde_json::to_string(&Urgency::Urgent).unwrap(), "\"urgent\"");
    }

    #[test]
    fn test_urgency_default_and_cycle() {
        assert_eq!(Urgency::default(), Urgency::Normal);
        assert_eq!(Urgency::Urgent.next(), Urgency::Low);
    }
}
