//! Authentication state machine

use std::fmt;

use crate::types::AuthResponse;

/// State of a login attempt
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// No request in flight
    #[default]
    Idle,
    /// Request in flight
    Loading,
    /// Terminal until reset
    Success(AuthResponse),
    /// Terminal until reset
    Error(String),
}

impl AuthState {
    pub fn is_idle(&self) -> bool {
        matches!(self, AuthState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::Loading)
    }

    /// `Success` or `Error`
    pub fn is_terminal(&self) -> bool {
        matches!(self, AuthState::Success(_) | AuthState::Error(_))
    }

    pub fn response(&self) -> Option<&AuthResponse> {
        match self {
            AuthState::Success(response) => Some(response),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            AuthState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Whether moving from `self` to `next` is a legal transition.
    ///
    /// `Idle` is always reachable (reset); otherwise the only moves are
    /// `Idle -> Loading` and `Loading -> Success | Error`.
    pub fn can_transition_to(&self, next: &AuthState) -> bool {
        match (self, next) {
            (_, AuthState::Idle) => true,
            (AuthState::Idle, AuthState::Loading) => true,
            (AuthState::Loading, AuthState::Success(_) | AuthState::Error(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthState::Idle => write!(f, "idle"),
            AuthState::Loading => write!(f, "loading"),
            AuthState::Success(response) => write!(f, "success ({})", response.username),
            AuthState::Error(message) => write!(f, "error ({})", message),
        }
    }
}
