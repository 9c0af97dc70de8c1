//! Error type for the login client

use thiserror::Error;

use crate::state::AuthState;

/// Errors produced by the login client
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    /// The endpoint answered with a non-success status
    #[error("Login failed with status {status}: {message}")]
    ApiError { status: u16, message: String },

    /// `login` was called while the controller was not idle
    #[error("Login already started (current state: {0})")]
    NotIdle(AuthState),
}

impl AuthError {
    pub fn api<T: std::fmt::Display>(status: u16, message: T) -> Self {
        AuthError::ApiError {
            status,
            message: message.to_string(),
        }
    }
}

/// Message used when a failed response carries no description of its own
pub const UNKNOWN_ERROR: &str = "Unknown error";
