//! District and congregation a sheet is reported for

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the services on a sheet took place
///
/// Set once per session and kept across submissions so the operator can
/// start the next month without retyping it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationContext {
    pub district: String,
    pub congregation: String,
}

impl LocationContext {
    pub fn new(district: impl Into<String>, congregation: impl Into<String>) -> Self {
        Self {
            district: district.into(),
            congregation: congregation.into(),
        }
    }

    /// Both fields hold something other than whitespace
    pub fn is_complete(&self) -> bool {
        !self.district.trim().is_empty() && !self.congregation.trim().is_empty()
    }

    /// Copy with surrounding whitespace removed
    pub fn trimmed(&self) -> Self {
        Self::new(self.district.trim(), self.congregation.trim())
    }
}

impl fmt::Display for LocationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_complete() {
            write!(f, "{} - {}", self.district.trim(), self.congregation.trim())
        } else {
            write!(f, "Not set")
        }
    }
}
