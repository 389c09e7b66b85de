use chrono::Utc;

use crate::backend::{BackendAuthClient, LoginOutcome};
use crate::events::{GatewayEvent, dispatch};
use crate::{GatewayError, SecretString};

/// Result of a successful proxied login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSuccess {
    pub username: String,
    /// Backend `Set-Cookie` values, to be copied onto the response verbatim.
    pub set_cookies: Vec<String>,
}

pub struct LoginAction<B: BackendAuthClient> {
    backend: B,
}

impl<B: BackendAuthClient> LoginAction<B> {
    pub fn new(backend: B) -> Self {
        LoginAction { backend }
    }

    /// Validates the input, then proxies the login to the backend.
    ///
    /// # Returns
    ///
    /// - `Ok(LoginSuccess)` - backend redirected with a session cookie
    /// - `Err(GatewayError::MissingCredentials)` - empty field, backend not called
    /// - `Err(GatewayError::InvalidCredentials)` - rejected or ambiguous response
    /// - `Err(GatewayError::BackendUnavailable(_))` - transport failure
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "login", skip_all, err)
    )]
    pub async fn execute(
        &self,
        username: Option<&str>,
        password: Option<&SecretString>,
    ) -> Result<LoginSuccess, GatewayError> {
        // whitespace-only counts as missing; anything else goes upstream as typed
        let username = username.filter(|u| !u.trim().is_empty());
        let password = password.filter(|p| !p.is_empty());

        let (Some(username), Some(password)) = (username, password) else {
            log::info!(target: "enclave_gateway", "msg=\"login rejected\" reason=\"missing credentials\"");
            return Err(GatewayError::MissingCredentials);
        };

        let outcome = self.backend.login(username, password).await;

        let (reason, error) = match outcome {
            LoginOutcome::Success { set_cookies } => {
                log::info!(target: "enclave_gateway", "msg=\"login success\" username=\"{username}\"");
                dispatch(GatewayEvent::LoginSucceeded {
                    username: username.to_owned(),
                    at: Utc::now(),
                })
                .await;

                return Ok(LoginSuccess {
                    username: username.to_owned(),
                    set_cookies,
                });
            }
            LoginOutcome::CredentialFailure => ("credential", GatewayError::InvalidCredentials),
            LoginOutcome::AmbiguousFailure(hint) => {
                log::warn!(target: "enclave_gateway", "msg=\"ambiguous backend login response\" hint=\"{hint:?}\"");
                ("ambiguous", GatewayError::InvalidCredentials)
            }
            LoginOutcome::TransportFailure(detail) => {
                ("transport", GatewayError::BackendUnavailable(detail))
            }
        };

        log::info!(target: "enclave_gateway", "msg=\"login failed\" username=\"{username}\" reason=\"{reason}\"");
        dispatch(GatewayEvent::LoginFailed {
            username: username.to_owned(),
            reason: reason.to_owned(),
            at: Utc::now(),
        })
        .await;

        Err(error)
    }
}
