use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use super::{BackendAuthClient, LoginOutcome, LogoutOutcome};
use crate::{SecretString, SessionCredential};

/// A call the gateway made against the mock backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Login { username: String },
    Logout { cookies: String },
    CheckStatus { cookies: String },
}

/// Scripted [`BackendAuthClient`] that records every call.
#[derive(Clone)]
pub struct MockBackendClient {
    login: LoginOutcome,
    logout: LogoutOutcome,
    authenticated: bool,
    calls: Arc<Mutex<Vec<BackendCall>>>,
}

impl MockBackendClient {
    /// Accepts every login with a `session=mock-session` cookie.
    pub fn new() -> Self {
        Self {
            login: LoginOutcome::Success {
                set_cookies: vec!["session=mock-session; HttpOnly; Path=/".to_owned()],
            },
            logout: LogoutOutcome::Acknowledged,
            authenticated: true,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn with_login(mut self, outcome: LoginOutcome) -> Self {
        self.login = outcome;
        self
    }

    #[must_use]
    pub fn with_logout(mut self, outcome: LogoutOutcome) -> Self {
        self.logout = outcome;
        self
    }

    #[must_use]
    pub fn with_status(mut self, authenticated: bool) -> Self {
        self.authenticated = authenticated;
        self
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn record(&self, call: BackendCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

impl Default for MockBackendClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackendAuthClient for MockBackendClient {
    async fn login(&self, username: &str, _password: &SecretString) -> LoginOutcome {
        self.record(BackendCall::Login {
            username: username.to_owned(),
        });
        self.login.clone()
    }

    async fn logout(&self, credential: &SessionCredential) -> LogoutOutcome {
        self.record(BackendCall::Logout {
            cookies: credential.expose_secret().to_owned(),
        });
        self.logout.clone()
    }

    async fn check_status(&self, credential: &SessionCredential) -> bool {
        self.record(BackendCall::CheckStatus {
            cookies: credential.expose_secret().to_owned(),
        });
        self.authenticated
    }
}
