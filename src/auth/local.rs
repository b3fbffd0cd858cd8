//! Local accounts
//!
//! Users live in `users.json` with Argon2id password hashes in PHC string
//! form. Hashing runs on the blocking pool so the async runtime is never
//! stalled by it.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::AuthError;
use crate::models::{Secret, Session, UserId, UserProfile};
use crate::storage::{read_json, write_json_atomic};

use super::{check_password_strength, normalize_email, Authenticator};

/// One stored account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    pub id: UserId,
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl StoredUser {
    fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            display_name: self.display_name.clone(),
            email: self.email.clone(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct UserStore {
    #[serde(default)]
    users: Vec<StoredUser>,
}

pub struct LocalAuthenticator {
    path: PathBuf,
    argon2: Argon2<'static>,
    /// Serializes read-modify-write of the users file
    lock: Mutex<()>,
}

impl LocalAuthenticator {
    pub fn new(path: PathBuf) -> Self {
        Self::with_params(path, Params::default())
    }

    /// Use custom Argon2 cost parameters
    pub fn with_params(path: PathBuf, params: Params) -> Self {
        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);
        Self {
            path,
            argon2,
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<UserStore, AuthError> {
        read_json(&self.path).map_err(|e| AuthError::Storage(e.to_string()))
    }

    fn save(&self, store: &UserStore) -> Result<(), AuthError> {
        write_json_atomic(&self.path, store).map_err(|e| AuthError::Storage(e.to_string()))
    }

    /// Every stored account, without password hashes
    pub async fn list_users(&self) -> Result<Vec<UserProfile>, AuthError> {
        let _guard = self.lock.lock().await;
        Ok(self.load()?.users.iter().map(StoredUser::profile).collect())
    }

    async fn hash(&self, password: &Secret) -> Result<String, AuthError> {
        let argon2 = self.argon2.clone();
        let password = password.clone();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.expose().as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| AuthError::Storage(format!("Failed to hash password: {}", e)))
        })
        .await
        .map_err(|e| AuthError::Storage(format!("Password hashing task failed: {}", e)))?
    }

    async fn verify(&self, password: &Secret, hash: &str) -> Result<bool, AuthError> {
        let argon2 = self.argon2.clone();
        let password = password.clone();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&hash)
                .map_err(|e| AuthError::Storage(format!("Corrupt password hash: {}", e)))?;
            match argon2.verify_password(password.expose().as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(argon2::password_hash::Error::Password) => Ok(false),
                Err(e) => Err(AuthError::Storage(format!(
                    "Password verification error: {}",
                    e
                ))),
            }
        })
        .await
        .map_err(|e| AuthError::Storage(format!("Password verification task failed: {}", e)))?
    }
}

fn new_token() -> Secret {
    Secret::new(Uuid::new_v4().simple().to_string())
}

#[async_trait]
impl Authenticator for LocalAuthenticator {
    async fn sign_in(&self, email: &str, password: &Secret) -> Result<Session, AuthError> {
        let email = normalize_email(email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = {
            let _guard = self.lock.lock().await;
            self.load()?
                .users
                .into_iter()
                .find(|u| u.email == email)
                .ok_or(AuthError::InvalidCredentials)?
        };

        if !self.verify(password, &user.password_hash).await? {
            debug!(email = %email, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        info!(user = %user.id.short(), "Signed in");
        Ok(Session::new(user.profile(), new_token()))
    }

    async fn sign_up(
        &self,
        display_name: &str,
        email: &str,
        password: &Secret,
    ) -> Result<Session, AuthError> {
        let email = normalize_email(email)?;
        check_password_strength(password)?;
        let password_hash = self.hash(password).await?;

        let _guard = self.lock.lock().await;
        let mut store = self.load()?;
        if store.users.iter().any(|u| u.email == email) {
            return Err(AuthError::EmailInUse(email));
        }

        let user = StoredUser {
            id: UserId::new(),
            display_name: display_name.trim().to_string(),
            email,
            password_hash,
            created_at: Utc::now(),
        };
        store.users.push(user.clone());
        self.save(&store)?;

        info!(user = %user.id.short(), "Account created");
        Ok(Session::new(user.profile(), new_token()))
    }

    async fn sign_out(&self, session: &Session) -> Result<(), AuthError> {
        info!(user = %session.user.id.short(), "Signed out");
        Ok(())
    }

    fn name(&self) -> &str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn authenticator(dir: &TempDir) -> LocalAuthenticator {
        // Cheap parameters keep the tests fast
        let params = Params::new(256, 1, 1, None).unwrap();
        LocalAuthenticator::with_params(dir.path().join("users.json"), params)
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let dir = TempDir::new().unwrap();
        let auth = authenticator(&dir);

        let session = auth
            .sign_up("Ada Lovelace", "Ada@Example.com", &Secret::new("engine42"))
            .await
            .unwrap();
        assert_eq!(session.user.email, "ada@example.com");
        assert_eq!(session.display_name(), "Ada Lovelace");

        let again = auth
            .sign_in("ada@example.com", &Secret::new("engine42"))
            .await
            .unwrap();
        assert_eq!(again.user.id, session.user.id);

        let stored = std::fs::read_to_string(dir.path().join("users.json")).unwrap();
        assert!(stored.contains("$argon2id$"));
        assert!(!stored.contains("engine42"));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email() {
        let dir = TempDir::new().unwrap();
        let auth = authenticator(&dir);
        auth.sign_up("Ada", "ada@example.com", &Secret::new("engine42"))
            .await
            .unwrap();

        assert_eq!(
            auth.sign_in("ada@example.com", &Secret::new("wrong-pass"))
                .await
                .unwrap_err(),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            auth.sign_in("bob@example.com", &Secret::new("engine42"))
                .await
                .unwrap_err(),
            AuthError::InvalidCredentials
        );
    }

    #[tokio::test]
    async fn test_duplicate_and_weak_sign_up() {
        let dir = TempDir::new().unwrap();
        let auth = authenticator(&dir);
        auth.sign_up("Ada", "ada@example.com", &Secret::new("engine42"))
            .await
            .unwrap();

        assert_eq!(
            auth.sign_up("Ada 2", "ADA@example.com", &Secret::new("another1"))
                .await
                .unwrap_err(),
            AuthError::EmailInUse("ada@example.com".into())
        );
        assert_eq!(
            auth.sign_up("Bob", "bob@example.com", &Secret::new("123"))
                .await
                .unwrap_err(),
            AuthError::WeakPassword { min: 6 }
        );
        assert!(matches!(
            auth.sign_up("Bob", "bob", &Secret::new("123456")).await,
            Err(AuthError::InvalidEmail(_))
        ));
        assert_eq!(auth.list_users().await.unwrap().len(), 1);
    }
}
