//! Authentication
//!
//! An `Authenticator` turns credentials into a `Session`. The local provider
//! keeps accounts in `users.json`; the identity toolkit provider talks to a
//! hosted identity service over REST. `SessionContext` holds the session the
//! UI is running under and tells listeners when it changes.

pub mod identity_toolkit;
pub mod local;
pub mod session;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{AuthSettings, ReturnsPaths, Settings};
use crate::error::AuthError;
use crate::models::{Secret, Session};
use crate::validation;

pub use identity_toolkit::IdentityToolkitAuthenticator;
pub use local::LocalAuthenticator;
pub use session::SessionContext;

/// Shortest password either provider accepts
pub const MIN_PASSWORD_LEN: usize = 6;

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn sign_in(&self, email: &str, password: &Secret) -> Result<Session, AuthError>;

    /// Create an account and sign it in
    async fn sign_up(
        &self,
        display_name: &str,
        email: &str,
        password: &Secret,
    ) -> Result<Session, AuthError>;

    async fn sign_out(&self, session: &Session) -> Result<(), AuthError>;

    fn name(&self) -> &str;
}

/// Lower-cased, trimmed email, or `InvalidEmail`
pub(crate) fn normalize_email(email: &str) -> Result<String, AuthError> {
    validation::parse_email(email)
        .map(|e| e.to_lowercase())
        .map_err(|_| AuthError::InvalidEmail(email.trim().to_string()))
}

pub(crate) fn check_password_strength(password: &Secret) -> Result<(), AuthError> {
    if password.expose().chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::WeakPassword {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Build the authenticator configured in settings
pub fn build_authenticator(settings: &Settings, paths: &ReturnsPaths) -> Arc<dyn Authenticator> {
    match &settings.auth {
        AuthSettings::Local => Arc::new(LocalAuthenticator::new(paths.users_file())),
        AuthSettings::IdentityToolkit { api_key, endpoint } => {
            let auth = IdentityToolkitAuthenticator::new(api_key.clone(), settings.submit_timeout());
            match endpoint {
                Some(endpoint) => Arc::new(auth.with_endpoint(endpoint.clone())),
                None => Arc::new(auth),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email(" Ada@Example.COM ").unwrap(), "ada@example.com");
        assert_eq!(
            normalize_email("nope"),
            Err(AuthError::InvalidEmail("nope".into()))
        );
    }

    #[test]
    fn test_password_strength() {
        assert!(check_password_strength(&Secret::new("123456")).is_ok());
        assert_eq!(
            check_password_strength(&Secret::new("12345")),
            Err(AuthError::WeakPassword { min: 6 })
        );
    }
}
