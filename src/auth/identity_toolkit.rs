//! Hosted identity provider
//!
//! Email/password accounts through the Identity Toolkit REST API
//! (`accounts:signInWithPassword`, `accounts:signUp`, `accounts:update`),
//! authenticated with the project's API key.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::AuthError;
use crate::models::{Secret, Session, UserId, UserProfile};

use super::{check_password_strength, normalize_email, Authenticator, MIN_PASSWORD_LEN};

pub const DEFAULT_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1";

pub struct IdentityToolkitAuthenticator {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProfileRequest<'a> {
    id_token: &'a str,
    display_name: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    id_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Map a provider error message such as `WEAK_PASSWORD : ...` to an error
fn map_error_code(message: &str, email: &str) -> AuthError {
    let code = message.split(':').next().unwrap_or_default().trim();
    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            AuthError::InvalidCredentials
        }
        "EMAIL_EXISTS" => AuthError::EmailInUse(email.to_string()),
        "WEAK_PASSWORD" => AuthError::WeakPassword {
            min: MIN_PASSWORD_LEN,
        },
        "INVALID_EMAIL" => AuthError::InvalidEmail(email.to_string()),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthError::TooManyAttempts,
        "USER_DISABLED" => AuthError::UserDisabled,
        _ => AuthError::Provider(message.to_string()),
    }
}

/// Identity provider user ids are not UUIDs; derive a stable one
fn user_id_for(local_id: &str) -> UserId {
    UserId::from(Uuid::new_v5(&Uuid::NAMESPACE_OID, local_id.as_bytes()))
}

impl IdentityToolkitAuthenticator {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key,
        }
    }

    /// Point at a different base URL (emulators, tests)
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    fn url(&self, method: &str) -> String {
        format!("{}/accounts:{}?key={}", self.endpoint, method, self.api_key)
    }

    async fn call<B: Serialize + Sync>(
        &self,
        method: &str,
        body: &B,
        email: &str,
    ) -> Result<AccountResponse, AuthError> {
        debug!(method, "Calling identity provider");
        let response = self
            .client
            .post(self.url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorEnvelope>(&text) {
                Ok(envelope) => map_error_code(&envelope.error.message, email),
                Err(_) => AuthError::Provider(format!("HTTP {}", status.as_u16())),
            });
        }

        serde_json::from_str(&text).map_err(|e| AuthError::Provider(e.to_string()))
    }

    fn session(account: AccountResponse, fallback_email: &str) -> Session {
        let email = if account.email.is_empty() {
            fallback_email.to_string()
        } else {
            account.email
        };
        Session::new(
            UserProfile {
                id: user_id_for(&account.local_id),
                display_name: account.display_name,
                email,
            },
            Secret::new(account.id_token),
        )
    }
}

#[async_trait]
impl Authenticator for IdentityToolkitAuthenticator {
    async fn sign_in(&self, email: &str, password: &Secret) -> Result<Session, AuthError> {
        let email = normalize_email(email)?;
        let request = PasswordRequest {
            email: &email,
            password: password.expose(),
            return_secure_token: true,
        };
        let account = self.call("signInWithPassword", &request, &email).await?;

        let session = Self::session(account, &email);
        info!(user = %session.user.id.short(), "Signed in");
        Ok(session)
    }

    async fn sign_up(
        &self,
        display_name: &str,
        email: &str,
        password: &Secret,
    ) -> Result<Session, AuthError> {
        let email = normalize_email(email)?;
        check_password_strength(password)?;
        let request = PasswordRequest {
            email: &email,
            password: password.expose(),
            return_secure_token: true,
        };
        let mut account = self.call("signUp", &request, &email).await?;

        let display_name = display_name.trim();
        if !display_name.is_empty() {
            let update = UpdateProfileRequest {
                id_token: &account.id_token,
                display_name,
                return_secure_token: true,
            };
            let updated = self.call("update", &update, &email).await?;
            account.display_name = display_name.to_string();
            if !updated.id_token.is_empty() {
                account.id_token = updated.id_token;
            }
        }

        let session = Self::session(account, &email);
        info!(user = %session.user.id.short(), "Account created");
        Ok(session)
    }

    async fn sign_out(&self, session: &Session) -> Result<(), AuthError> {
        // Tokens are bearer tokens; dropping the session is enough
        info!(user = %session.user.id.short(), "Signed out");
        Ok(())
    }

    fn name(&self) -> &str {
        "identity-toolkit"
    }
}
