//! Options for the login controller

use std::time::Duration;

use crate::types::DEFAULT_EXPIRES_IN_MINS;

/// Default login endpoint
pub const DEFAULT_LOGIN_URL: &str = "https://dummyjson.com/auth/login";

/// Value sent in the `X-Client-Info` header
pub const CLIENT_INFO: &str = concat!("nindotx-auth/", env!("CARGO_PKG_VERSION"));

/// Controller options
#[derive(Debug, Clone)]
pub struct AuthOptions {
    /// Full URL the credentials are POSTed to
    pub login_url: String,
    /// Requested token lifetime
    pub expires_in_mins: u32,
    /// Per-request timeout; `None` leaves it to the transport
    pub request_timeout: Option<Duration>,
    pub client_info: String,
}

impl Default for AuthOptions {
    fn default() -> Self {
        Self {
            login_url: DEFAULT_LOGIN_URL.to_string(),
            expires_in_mins: DEFAULT_EXPIRES_IN_MINS,
            request_timeout: None,
            client_info: CLIENT_INFO.to_string(),
        }
    }
}

impl AuthOptions {
    /// Set the login endpoint
    pub fn with_login_url(mut self, value: &str) -> Self {
        self.login_url = value.to_string();
        self
    }

    /// Set the requested token lifetime
    pub fn with_expires_in_mins(mut self, value: u32) -> Self {
        self.expires_in_mins = value;
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the client info header value
    pub fn with_client_info(mut self, value: &str) -> Self {
        self.client_info = value.to_string();
        self
    }
}
