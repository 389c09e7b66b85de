use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{StatusCode, redirect};

use super::{BackendAuthClient, BackendResponse, LoginOutcome, LogoutOutcome, classify_login_response};
use crate::config::BackendConfig;
use crate::{GatewayError, SecretString, SessionCredential};

/// [`BackendAuthClient`] over HTTP.
///
/// Redirects are never followed: a redirect is the backend's success signal
/// on login, and on the probe endpoint it means "go log in".
#[derive(Clone)]
pub struct HttpBackendClient {
    client: reqwest::Client,
    config: Arc<BackendConfig>,
}

impl HttpBackendClient {
    pub fn new(config: BackendConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GatewayError::ConfigurationError(format!("http client: {e}")))?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }
}

#[async_trait]
impl BackendAuthClient for HttpBackendClient {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "backend.login", skip_all)
    )]
    async fn login(&self, username: &str, password: &SecretString) -> LoginOutcome {
        let url = self.config.url(&self.config.login_path);
        let form = [("username", username), ("password", password.expose_secret())];

        let response = match self.client.post(&url).form(&form).send().await {
            Ok(response) => response,
            Err(e) => {
                log::error!(target: "enclave_gateway::backend", "msg=\"login request failed\" error=\"{e}\"");
                return LoginOutcome::TransportFailure(e.to_string());
            }
        };

        let status = response.status();
        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(ToOwned::to_owned)
            .collect();

        let body = if status == StatusCode::OK {
            match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    log::error!(target: "enclave_gateway::backend", "msg=\"login body unreadable\" error=\"{e}\"");
                    return LoginOutcome::TransportFailure(e.to_string());
                }
            }
        } else {
            String::new()
        };

        log::debug!(target: "enclave_gateway::backend", "msg=\"login response\" status={}", status.as_u16());

        classify_login_response(
            BackendResponse {
                status,
                set_cookies,
                body,
            },
            &self.config.failure_markers,
        )
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "backend.logout", skip_all)
    )]
    async fn logout(&self, credential: &SessionCredential) -> LogoutOutcome {
        let url = self.config.url(&self.config.logout_path);

        match self
            .client
            .get(&url)
            .header(COOKIE, credential.expose_secret())
            .send()
            .await
        {
            // the backend answers a logout with a redirect to its login page
            Ok(response) if response.status().is_success() || response.status().is_redirection() => {
                LogoutOutcome::Acknowledged
            }
            Ok(response) => LogoutOutcome::Failed(format!("status {}", response.status().as_u16())),
            Err(e) => LogoutOutcome::Failed(e.to_string()),
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "backend.check_status", skip_all)
    )]
    async fn check_status(&self, credential: &SessionCredential) -> bool {
        let url = self.config.url(&self.config.probe_path);

        match self
            .client
            .get(&url)
            .header(COOKIE, credential.expose_secret())
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                log::warn!(target: "enclave_gateway::backend", "msg=\"status probe failed\" error=\"{e}\"");
                false
            }
        }
    }
}
