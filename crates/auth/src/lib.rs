//! NindoTX authentication client
//!
//! Sends username/password to the login endpoint and tracks the attempt as a
//! four-state machine (`Idle`, `Loading`, `Success`, `Error`) that a UI can
//! observe.

mod controller;
mod error;
mod fetch;
mod options;
mod state;
mod types;

pub use controller::AuthController;
pub use error::{AuthError, UNKNOWN_ERROR};
pub use fetch::{Fetch, FetchBuilder};
pub use options::{AuthOptions, CLIENT_INFO, DEFAULT_LOGIN_URL};
pub use state::AuthState;
pub use types::{AuthRequest, AuthResponse, Credentials, DEFAULT_EXPIRES_IN_MINS};
