//! NindoTX client library
//!
//! Login flow core for the NindoTX app: a credential form with local
//! validation, an observable authentication state machine backed by a remote
//! login endpoint, and the navigation between the login and home views.

pub mod config;
pub mod error;
pub mod form;
pub mod navigation;
pub mod screen;

use reqwest::Client;
use std::sync::Arc;

pub use nindotx_auth as auth;

use crate::config::ClientOptions;
use crate::error::Result;
use crate::screen::LoginScreen;
use nindotx_auth::AuthController;

/// The main entry point for the NindoTX client
pub struct NindoTx {
    /// HTTP client shared by all requests
    pub http_client: Client,
    /// Owner of the auth state machine
    pub auth: Arc<AuthController>,
    /// Client options
    pub options: ClientOptions,
}

impl NindoTx {
    /// Create a client against the default endpoint
    ///
    /// # Example
    ///
    /// ```
    /// use nindotx::NindoTx;
    ///
    /// let client = NindoTx::new();
    /// assert!(client.auth().state().is_idle());
    /// ```
    pub fn new() -> Self {
        Self::build(ClientOptions::default())
    }

    /// Create a client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use nindotx::{NindoTx, config::ClientOptions};
    ///
    /// let options = ClientOptions::default().with_expires_in_mins(60);
    /// let client = NindoTx::new_with_options(options).unwrap();
    /// assert_eq!(client.auth().options().expires_in_mins, 60);
    /// ```
    pub fn new_with_options(options: ClientOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::build(options))
    }

    /// Create a client from `NINDOTX_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new_with_options(ClientOptions::from_env()?)
    }

    fn build(options: ClientOptions) -> Self {
        let http_client = Client::new();
        let auth = Arc::new(AuthController::with_http_client(
            http_client.clone(),
            options.to_auth_options(),
        ));

        Self {
            http_client,
            auth,
            options,
        }
    }

    /// Get a reference to the auth controller
    pub fn auth(&self) -> &Arc<AuthController> {
        &self.auth
    }

    /// A fresh login screen bound to this client's controller
    pub fn login_screen(&self) -> LoginScreen {
        LoginScreen::new(Arc::clone(&self.auth))
    }
}

impl Default for NindoTx {
    fn default() -> Self {
        Self::new()
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::form::{CredentialForm, FormError};
    pub use crate::navigation::{HomeAction, HomeView, Navigator, Route};
    pub use crate::screen::{Alert, LoginScreen};
    pub use crate::NindoTx;
    pub use nindotx_auth::{AuthController, AuthResponse, AuthState};
}
