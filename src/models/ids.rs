//! Strongly-typed ID wrappers
//!
//! Entries, return requests, users and outbox messages each get their own
//! UUID newtype so they cannot be mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// The prefixed short form shown in tables, e.g. `ent-1a2b3c4d`
            pub fn short(&self) -> String {
                let simple = self.0.simple().to_string();
                format!("{}{}", $display_prefix, &simple[..8])
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(EntryId, "ent-");
define_id!(ReturnId, "ret-");
define_id!(UserId, "usr-");
define_id!(MessageId, "msg-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trips_through_from_str() {
        let id = MessageId::new();
        let shown = id.to_string();
        assert!(shown.starts_with("msg-"));
        assert_eq!(shown.parse::<MessageId>().unwrap(), id);
    }

    #[test]
    fn test_parse_bare_uuid() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: EntryId = uuid_str.parse().unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);
        assert_eq!(id.short(), "ent-550e8400");
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(EntryId::new(), EntryId::new());
    }
}
