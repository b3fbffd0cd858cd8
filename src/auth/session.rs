//! The session the application is running under
//!
//! Screens never reach for a global "current user". They hold a
//! `SessionContext`, ask it to sign in or out, and subscribe with
//! `on_session_change` to hear about every transition.

use std::sync::Arc;
use tracing::warn;

use crate::error::{ReturnsError, ReturnsResult, ValidationError};
use crate::models::{Secret, Session};

use super::Authenticator;

type Listener = Box<dyn Fn(Option<&Session>) + Send + Sync>;

pub struct SessionContext {
    auth: Arc<dyn Authenticator>,
    current: Option<Session>,
    listeners: Vec<Listener>,
}

impl SessionContext {
    /// Start signed out
    pub fn init(auth: Arc<dyn Authenticator>) -> Self {
        Self {
            auth,
            current: None,
            listeners: Vec::new(),
        }
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn provider(&self) -> &str {
        self.auth.name()
    }

    /// Subscribe to session changes; the callback runs once right away
    pub fn on_session_change<F>(&mut self, listener: F)
    where
        F: Fn(Option<&Session>) + Send + Sync + 'static,
    {
        listener(self.current.as_ref());
        self.listeners.push(Box::new(listener));
    }

    fn set(&mut self, session: Option<Session>) {
        self.current = session;
        for listener in &self.listeners {
            listener(self.current.as_ref());
        }
    }

    pub async fn sign_in(&mut self, email: &str, password: &Secret) -> ReturnsResult<&Session> {
        let session = self.auth.sign_in(email, password).await?;
        self.set(Some(session));
        self.current.as_ref().ok_or(ReturnsError::NotSignedIn)
    }

    /// Create an account; `confirm` must repeat the password
    pub async fn sign_up(
        &mut self,
        display_name: &str,
        email: &str,
        password: &Secret,
        confirm: &Secret,
    ) -> ReturnsResult<&Session> {
        if password.expose() != confirm.expose() {
            return Err(ValidationError::PasswordMismatch.into());
        }
        let session = self.auth.sign_up(display_name, email, password).await?;
        self.set(Some(session));
        self.current.as_ref().ok_or(ReturnsError::NotSignedIn)
    }

    /// End the current session; a no-op when already signed out
    pub async fn sign_out(&mut self) {
        let Some(session) = self.current.take() else {
            return;
        };
        // The local session is gone either way
        if let Err(e) = self.auth.sign_out(&session).await {
            warn!(error = %e, "Provider sign-out failed");
        }
        self.set(None);
    }
}
