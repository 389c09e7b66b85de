//! Caller-side SDK for the gateway's auth endpoints.
//!
//! [`GatewayClient`] keeps the gateway's cookies in its own jar, so a login
//! followed by `status` or `logout` behaves like a browser would.
//! [`ClientSessionHost`] plugs it into a [`SessionMonitor`](crate::session::SessionMonitor).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;

use crate::api::{LoginResponse, LogoutResponse, StatusResponse};
use crate::config::MonitorConfig;
use crate::session::{Clock, SessionHost, TimestampStore, clear_login, record_login};
use crate::{GatewayError, SecretString};

#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: String,
}

impl GatewayClient {
    /// `base_url` is where the gateway is mounted, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::ConfigurationError(format!("http client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth{path}", self.base_url)
    }

    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, GatewayError> {
        let response = self
            .client
            .post(self.url("/login"))
            .json(&json!({
                "username": username,
                "password": password.expose_secret(),
            }))
            .send()
            .await
            .map_err(|e| GatewayError::BackendUnavailable(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<LoginResponse>()
                .await
                .map_err(|e| GatewayError::Internal(format!("unreadable login response: {e}"))),
            StatusCode::BAD_REQUEST => Err(GatewayError::MissingCredentials),
            StatusCode::UNAUTHORIZED => Err(GatewayError::InvalidCredentials),
            status => Err(GatewayError::BackendUnavailable(format!(
                "gateway answered {status}"
            ))),
        }
    }

    /// Logs in and, on success, records the login instant for the monitor.
    pub async fn login_with_timestamp(
        &self,
        username: &str,
        password: &SecretString,
        store: &impl TimestampStore,
        clock: &impl Clock,
        config: &MonitorConfig,
    ) -> Result<LoginResponse, GatewayError> {
        let response = self.login(username, password).await?;
        record_login(store, clock, config);
        Ok(response)
    }

    pub async fn logout(&self) -> Result<LogoutResponse, GatewayError> {
        let response = self
            .client
            .post(self.url("/logout"))
            .send()
            .await
            .map_err(|e| GatewayError::BackendUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GatewayError::BackendUnavailable(format!(
                "gateway answered {}",
                response.status()
            )));
        }

        response
            .json::<LogoutResponse>()
            .await
            .map_err(|e| GatewayError::Internal(format!("unreadable logout response: {e}")))
    }

    /// Logs out and forgets the local login instant, whatever the gateway says.
    pub async fn logout_and_clear(
        &self,
        store: &impl TimestampStore,
        config: &MonitorConfig,
    ) -> Result<LogoutResponse, GatewayError> {
        clear_login(store, config);
        self.logout().await
    }

    /// Any failure to reach the gateway reads as unauthenticated.
    pub async fn status(&self) -> bool {
        let response = match self.client.get(self.url("/status")).send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!(target: "enclave_gateway::client", "msg=\"status request failed\" error=\"{e}\"");
                return false;
            }
        };

        response
            .json::<StatusResponse>()
            .await
            .map(|s| s.authenticated)
            .unwrap_or(false)
    }
}

type RedirectFn = Arc<dyn Fn(&str) + Send + Sync>;

/// [`SessionHost`] backed by the gateway endpoints.
///
/// Navigation is up to the embedding application, handed in as a callback
/// that receives the login path.
#[derive(Clone)]
pub struct ClientSessionHost {
    client: GatewayClient,
    login_path: String,
    redirect: RedirectFn,
}

impl ClientSessionHost {
    pub fn new(
        client: GatewayClient,
        login_path: impl Into<String>,
        redirect: impl Fn(&str) + Send + Sync + 'static,
    ) -> Self {
        Self {
            client,
            login_path: login_path.into(),
            redirect: Arc::new(redirect),
        }
    }

    pub fn client(&self) -> &GatewayClient {
        &self.client
    }
}

#[async_trait]
impl SessionHost for ClientSessionHost {
    async fn end_session(&self) {
        if let Err(e) = self.client.logout().await {
            log::warn!(target: "enclave_gateway::client", "msg=\"logout during expiry failed\" error=\"{e}\"");
        }
    }

    fn redirect_to_login(&self) {
        (self.redirect)(&self.login_path);
    }

    async fn revalidate(&self) -> bool {
        self.client.status().await
    }
}
