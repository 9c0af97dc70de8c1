//! Wire types for the login endpoint

use serde::{Deserialize, Serialize};
use std::fmt;

/// Token lifetime requested when none is configured
pub const DEFAULT_EXPIRES_IN_MINS: u32 = 30;

/// Username and password as typed by the user
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields are non-empty
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// Wipe both fields
    pub fn clear(&mut self) {
        self.username.clear();
        self.password.clear();
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of the login request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
    #[serde(default = "default_expires_in_mins")]
    pub expires_in_mins: u32,
}

fn default_expires_in_mins() -> u32 {
    DEFAULT_EXPIRES_IN_MINS
}

impl AuthRequest {
    pub fn new(username: &str, password: &str) -> Self {
        Self::with_expiry(username, password, DEFAULT_EXPIRES_IN_MINS)
    }

    pub fn with_expiry(username: &str, password: &str, expires_in_mins: u32) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            expires_in_mins,
        }
    }
}

/// Successful login payload. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    /// Avatar URL
    pub image: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Error body returned by the endpoint, e.g. `{"message": "Invalid credentials"}`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}
