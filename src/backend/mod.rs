//! Client side of the external backend's auth endpoints.
//!
//! The backend answers login with a redirect on success and a redisplayed
//! login page on failure, so every response is run through
//! [`classify_login_response`] before anything else sees it.

mod classify;
mod http;
#[cfg(feature = "mocks")]
mod mock;

use async_trait::async_trait;

pub use classify::{BackendResponse, classify_login_response};
pub use http::HttpBackendClient;
#[cfg(feature = "mocks")]
pub use mock::{BackendCall, MockBackendClient};

use crate::{SecretString, SessionCredential};

/// Why a login that was not a credential rejection still failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureHint {
    /// 200 page with no recognizable failure marker.
    NoFailureMarker,
    /// Redirect that did not carry a session cookie.
    RedirectWithoutCookie,
    /// Anything other than a redirect or 200.
    UnexpectedStatus(u16),
}

/// Classified result of a backend login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Redirect carrying the new session; `set_cookies` are forwarded verbatim.
    Success { set_cookies: Vec<String> },
    /// The backend redisplayed the login page with an error marker.
    CredentialFailure,
    /// No proof of success. Treated as a failure.
    AmbiguousFailure(FailureHint),
    /// The backend could not be reached or the body could not be read.
    TransportFailure(String),
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LoginOutcome::Success { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutOutcome {
    Acknowledged,
    Failed(String),
}

/// Outbound calls to the backend.
///
/// Implementations hold no state between calls.
#[async_trait]
pub trait BackendAuthClient: Send + Sync {
    async fn login(&self, username: &str, password: &SecretString) -> LoginOutcome;

    async fn logout(&self, credential: &SessionCredential) -> LogoutOutcome;

    /// Fail-closed: any error or non-2xx answer is `false`.
    async fn check_status(&self, credential: &SessionCredential) -> bool;
}
