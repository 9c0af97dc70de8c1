//! Error handling for the NindoTX client

use std::fmt;
use thiserror::Error;

use nindotx_auth::AuthError;

use crate::form::FormError;

/// Unified error type for the NindoTX client
#[derive(Error, Debug)]
pub enum Error {
    /// Errors from the auth controller
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Local credential validation
    #[error("{0}")]
    Form(#[from] FormError),

    /// Invalid option or environment value
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
