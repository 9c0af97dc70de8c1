//! Configuration options for the NindoTX client

use std::time::Duration;
use url::Url;

use nindotx_auth::{AuthOptions, CLIENT_INFO, DEFAULT_EXPIRES_IN_MINS, DEFAULT_LOGIN_URL};

use crate::error::{Error, Result};

/// Environment variable overriding the login endpoint
pub const ENV_AUTH_URL: &str = "NINDOTX_AUTH_URL";
/// Environment variable overriding the requested token lifetime
pub const ENV_EXPIRES_IN_MINS: &str = "NINDOTX_EXPIRES_IN_MINS";
/// Environment variable setting a request timeout in seconds
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "NINDOTX_REQUEST_TIMEOUT_SECS";

/// Configuration options for the NindoTX client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The login endpoint
    pub login_url: String,

    /// Token lifetime requested at login
    pub expires_in_mins: u32,

    /// The request timeout; `None` uses the transport default
    pub request_timeout: Option<Duration>,

    /// Sent as `X-Client-Info`
    pub client_info: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            login_url: DEFAULT_LOGIN_URL.to_string(),
            expires_in_mins: DEFAULT_EXPIRES_IN_MINS,
            request_timeout: None,
            client_info: CLIENT_INFO.to_string(),
        }
    }
}

impl ClientOptions {
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

    /// Defaults overridden by `NINDOTX_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();

        if let Some(url) = lookup(ENV_AUTH_URL) {
            options = options.with_login_url(url.trim());
        }
        if let Some(mins) = lookup(ENV_EXPIRES_IN_MINS) {
            let mins = mins
                .trim()
                .parse::<u32>()
                .map_err(|e| Error::config(format!("{} must be a number: {}", ENV_EXPIRES_IN_MINS, e)))?;
            options = options.with_expires_in_mins(mins);
        }
        if let Some(secs) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                Error::config(format!("{} must be a number: {}", ENV_REQUEST_TIMEOUT_SECS, e))
            })?;
            options = options.with_request_timeout(Some(Duration::from_secs(secs)));
        }

        options.validate()?;
        Ok(options)
    }

    /// Check that the endpoint is an http(s) URL and the lifetime is positive
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.login_url)?;
        match url.scheme() {
            "http" | "https" => {}
            s => return Err(Error::config(format!("Unsupported URL scheme: {}", s))),
        }
        if self.expires_in_mins == 0 {
            return Err(Error::config("expires_in_mins must be greater than zero"));
        }
        Ok(())
    }

    pub(crate) fn to_auth_options(&self) -> AuthOptions {
        AuthOptions::default()
            .with_login_url(&self.login_url)
            .with_expires_in_mins(self.expires_in_mins)
            .with_request_timeout(self.request_timeout)
            .with_client_info(&self.client_info)
    }
}
