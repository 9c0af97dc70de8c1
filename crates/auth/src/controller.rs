//! Owner of the authentication state machine

use log::{debug, info, warn};
use reqwest::Client;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::error::AuthError;
use crate::fetch::Fetch;
use crate::options::AuthOptions;
use crate::state::AuthState;
use crate::types::{AuthRequest, AuthResponse};

const STATE_CHANNEL_CAPACITY: usize = 16;

struct Inner {
    state: AuthState,
    /// Bumped by every `login` and `reset_state`; results from an older
    /// attempt are discarded.
    attempt: u64,
}

/// Issues login requests and publishes every state transition.
///
/// Only [`login`](Self::login) and [`reset_state`](Self::reset_state) write
/// the state. Observers read it with [`state`](Self::state) or follow it with
/// [`subscribe`](Self::subscribe).
pub struct AuthController {
    http_client: Client,
    options: AuthOptions,
    inner: RwLock<Inner>,
    state_change: broadcast::Sender<AuthState>,
}

impl AuthController {
    pub fn new(options: AuthOptions) -> Self {
        Self::with_http_client(Client::new(), options)
    }

    /// Create a controller sharing an existing HTTP client
    pub fn with_http_client(http_client: Client, options: AuthOptions) -> Self {
        let (state_change, _) = broadcast::channel(STATE_CHANNEL_CAPACITY);
        Self {
            http_client,
            options,
            inner: RwLock::new(Inner {
                state: AuthState::Idle,
                attempt: 0,
            }),
            state_change,
        }
    }

    pub fn options(&self) -> &AuthOptions {
        &self.options
    }

    /// Snapshot of the current state
    pub fn state(&self) -> AuthState {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .state
            .clone()
    }

    /// Receiver yielding every transition in the order it was written
    pub fn subscribe(&self) -> broadcast::Receiver<AuthState> {
        self.state_change.subscribe()
    }

    /// Log in with the given credentials.
    ///
    /// The state moves to `Loading` before the request is sent, then to
    /// `Success` or `Error`. Remote failures never surface as `Err`; they are
    /// published as `AuthState::Error` and returned as the outcome. The only
    /// `Err` is [`AuthError::NotIdle`] when an attempt is already running or a
    /// terminal state has not been reset.
    ///
    /// If [`reset_state`](Self::reset_state) is called while the request is in
    /// flight, the outcome is returned but not published.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthState, AuthError> {
        let attempt = self.begin()?;

        let request =
            AuthRequest::with_expiry(username, password, self.options.expires_in_mins);
        let outcome = match self.send(&request).await {
            Ok(response) => {
                info!("Login succeeded for {}", response.username);
                AuthState::Success(response)
            }
            Err(err) => {
                warn!("Login failed: {}", err);
                AuthState::Error(err.to_string())
            }
        };

        self.finish(attempt, outcome.clone());
        Ok(outcome)
    }

    /// Run [`login`](Self::login) on a Tokio task.
    ///
    /// The `Loading` transition happens on the task, so observers should use
    /// [`subscribe`](Self::subscribe) rather than polling right after this
    /// returns.
    pub fn spawn_login(
        self: &Arc<Self>,
        username: &str,
        password: &str,
    ) -> JoinHandle<Result<AuthState, AuthError>> {
        let controller = Arc::clone(self);
        let username = username.to_string();
        let password = password.to_string();
        tokio::spawn(async move { controller.login(&username, &password).await })
    }

    /// Force the state back to `Idle`
    pub fn reset_state(&self) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.attempt += 1;
        self.publish(&mut inner, AuthState::Idle);
    }

    async fn send(&self, request: &AuthRequest) -> Result<AuthResponse, AuthError> {
        Fetch::post(&self.http_client, &self.options.login_url)
            .header("X-Client-Info", &self.options.client_info)
            .timeout(self.options.request_timeout)
            .json(request)?
            .execute::<AuthResponse>()
            .await
    }

    fn begin(&self) -> Result<u64, AuthError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if !inner.state.is_idle() {
            debug!("Rejecting login while {}", inner.state);
            return Err(AuthError::NotIdle(inner.state.clone()));
        }
        inner.attempt += 1;
        self.publish(&mut inner, AuthState::Loading);
        Ok(inner.attempt)
    }

    fn finish(&self, attempt: u64, outcome: AuthState) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.attempt != attempt || !inner.state.can_transition_to(&outcome) {
            debug!("Discarding stale login outcome: {}", outcome);
            return;
        }
        self.publish(&mut inner, outcome);
    }

    /// Must be called with the write lock held so sends stay in write order.
    fn publish(&self, inner: &mut Inner, state: AuthState) {
        debug!("Auth state changing from {} to {}", inner.state, state);
        inner.state = state.clone();
        // No receivers is fine
        let _ = self.state_change.send(state);
    }
}

impl Default for AuthController {
    fn default() -> Self {
        Self::new(AuthOptions::default())
    }
}

impl std::fmt::Debug for AuthController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthController")
            .field("options", &self.options)
            .field("state", &self.state())
            .finish()
    }
}
