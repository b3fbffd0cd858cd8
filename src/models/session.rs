//! Signed-in user session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

use super::ids::UserId;

/// The person behind a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub display_name: String,
    pub email: String,
}

/// A string that is wiped from memory when dropped
///
/// Used for passwords and provider tokens. `Debug` never prints the value.
#[derive(Clone, Default)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret(***)")
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Secret {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// An authenticated session handed out by an identity provider
#[derive(Debug, Clone)]
pub struct Session {
    pub user: UserProfile,
    /// Provider token; opaque to the rest of the application
    pub token: Secret,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user: UserProfile, token: Secret) -> Self {
        Self {
            user,
            token,
            issued_at: Utc::now(),
        }
    }

    /// Name to greet the user with, falling back to their email
    pub fn display_name(&self) -> &str {
        if self.user.display_name.trim().is_empty() {
            &self.user.email
        } else {
            &self.user.display_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = Secret::new("hunter22");
        assert_eq!(format!("{:?}", secret), "Secret(***)");
        assert_eq!(secret.expose(), "hunter22");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let session = Session::new(
            UserProfile {
                id: UserId::new(),
                display_name: " ".into(),
                email: "ops@example.org".into(),
            },
            Secret::new("token"),
        );
        assert_eq!(session.display_name(), "ops@example.org");
    }
}
