//! Login screen reactions to the auth state

use std::fmt;
use std::sync::Arc;

use nindotx_auth::{AuthController, AuthState};

use crate::error::{Error, Result};
use crate::form::{CredentialForm, FormError};
use crate::navigation::Route;

/// Dismissible message shown over the login form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// Submitted with an empty field
    CredentialsMissing,
    /// The controller ended in `Error`
    AuthFailed(String),
}

impl Alert {
    pub fn title(&self) -> &'static str {
        "Login error"
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::CredentialsMissing => write!(f, "{}", FormError::CredentialsMissing),
            Alert::AuthFailed(message) => write!(f, "Authentication failed: {}", message),
        }
    }
}

/// Credential form plus the effects the login view runs on state changes.
///
/// `Success` yields a route to the home view; `Error` raises an alert and
/// resets the controller so the user can try again.
pub struct LoginScreen {
    controller: Arc<AuthController>,
    form: CredentialForm,
    alert: Option<Alert>,
}

impl LoginScreen {
    pub fn new(controller: Arc<AuthController>) -> Self {
        Self {
            controller,
            form: CredentialForm::new(),
            alert: None,
        }
    }

    pub fn form(&self) -> &CredentialForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CredentialForm {
        &mut self.form
    }

    pub fn controller(&self) -> &Arc<AuthController> {
        &self.controller
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// A request is in flight; the view shows a spinner instead of the form
    pub fn is_loading(&self) -> bool {
        self.controller.state().is_loading()
    }

    /// Submit the form and react to the outcome.
    ///
    /// Returns the route to navigate to, if any. Validation failures and
    /// remote failures end up in [`alert`](Self::alert), not in `Err`.
    pub async fn submit(&mut self) -> Result<Option<Route>> {
        let outcome = match self.form.submit(&self.controller).await {
            Ok(outcome) => outcome,
            Err(Error::Form(FormError::CredentialsMissing)) => {
                self.alert = Some(Alert::CredentialsMissing);
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
        Ok(self.react(&outcome))
    }

    /// Apply the effect for `state`
    pub fn react(&mut self, state: &AuthState) -> Option<Route> {
        match state {
            AuthState::Success(response) => Some(Route::home(&response.username)),
            AuthState::Error(message) => {
                self.alert = Some(Alert::AuthFailed(message.clone()));
                self.controller.reset_state();
                None
            }
            AuthState::Idle | AuthState::Loading => None,
        }
    }

    /// Back from the home view: reset the controller and clear the password
    pub fn on_logout(&mut self) {
        self.controller.reset_state();
        self.form.set_password("");
    }
}
