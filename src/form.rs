//! Credential entry and local validation

use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;

use nindotx_auth::{AuthController, AuthError, AuthState, Credentials};

use crate::error::Result;

/// Validation failures caught before any network access
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please enter both username and password")]
    CredentialsMissing,
}

/// Username, password and the "remember me" checkbox.
///
/// The remember-me flag is collected but nothing reads it yet. Credentials
/// are wiped when the form is dropped.
#[derive(Debug, Default)]
pub struct CredentialForm {
    credentials: Credentials,
    remember_me: bool,
}

impl CredentialForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(username: &str, password: &str) -> Self {
        Self {
            credentials: Credentials::new(username, password),
            remember_me: false,
        }
    }

    pub fn set_username(&mut self, value: &str) {
        self.credentials.username = value.to_string();
    }

    pub fn set_password(&mut self, value: &str) {
        self.credentials.password = value.to_string();
    }

    pub fn set_remember_me(&mut self, value: bool) {
        self.remember_me = value;
    }

    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    pub fn remember_me(&self) -> bool {
        self.remember_me
    }

    pub fn validate(&self) -> std::result::Result<&Credentials, FormError> {
        if self.credentials.is_complete() {
            Ok(&self.credentials)
        } else {
            Err(FormError::CredentialsMissing)
        }
    }

    /// Validate locally, then log in through `controller`.
    ///
    /// A validation failure returns before the controller is touched.
    pub async fn submit(&self, controller: &AuthController) -> Result<AuthState> {
        let credentials = self.validate()?;
        Ok(controller
            .login(&credentials.username, &credentials.password)
            .await?)
    }

    /// Like [`submit`](Self::submit) but runs the login on a Tokio task
    pub fn submit_spawned(
        &self,
        controller: &Arc<AuthController>,
    ) -> std::result::Result<JoinHandle<std::result::Result<AuthState, AuthError>>, FormError> {
        let credentials = self.validate()?;
        Ok(controller.spawn_login(&credentials.username, &credentials.password))
    }

    pub fn clear(&mut self) {
        self.credentials.clear();
        self.remember_me = false;
    }
}

impl Drop for CredentialForm {
    fn drop(&mut self) {
        self.credentials.clear();
    }
}
