//! Configuration types for the gateway.
//!
//! One [`GatewayConfig`] holds everything the handlers, the edge gate and the
//! client session monitor need. Defaults match the admin deployment: backend
//! on `http://localhost:5000`, a `session` cookie, `/admin` protected with
//! `/admin/login` as the entry point, and an 8 hour client-side session.
//!
//! # Example
//!
//! ```rust
//! use enclave_gateway::config::{BackendConfig, GatewayConfig};
//!
//! let config = GatewayConfig {
//!     backend: BackendConfig {
//!         base_url: "http://backend.internal:5000".to_owned(),
//!         ..Default::default()
//!     },
//!     ..GatewayConfig::development()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration as StdDuration;

use chrono::Duration;

use crate::GatewayError;

#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    pub backend: BackendConfig,
    pub cookie: CookieConfig,
    pub gate: GateConfig,
    pub monitor: MonitorConfig,
}

impl GatewayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Local development: cookies without `Secure` so plain http works.
    pub fn development() -> Self {
        Self {
            cookie: CookieConfig {
                secure: false,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Reads overrides from the process environment.
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `GATEWAY_BACKEND_URL` | `backend.base_url` |
    /// | `GATEWAY_BACKEND_TIMEOUT_SECS` | `backend.request_timeout` |
    /// | `GATEWAY_COOKIE_NAME` | `cookie.name` |
    /// | `GATEWAY_COOKIE_SECURE` | `cookie.secure` |
    /// | `GATEWAY_SESSION_TIMEOUT_MINUTES` | `monitor.session_timeout` |
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("GATEWAY_BACKEND_URL") {
            config.backend.base_url = url;
        }
        if let Some(secs) = lookup("GATEWAY_BACKEND_TIMEOUT_SECS") {
            let secs = parse_number::<u64>("GATEWAY_BACKEND_TIMEOUT_SECS", &secs)?;
            config.backend.request_timeout = StdDuration::from_secs(secs);
        }
        if let Some(name) = lookup("GATEWAY_COOKIE_NAME") {
            config.cookie.name = name;
        }
        if let Some(secure) = lookup("GATEWAY_COOKIE_SECURE") {
            config.cookie.secure = parse_bool("GATEWAY_COOKIE_SECURE", &secure)?;
        }
        if let Some(minutes) = lookup("GATEWAY_SESSION_TIMEOUT_MINUTES") {
            let minutes = parse_number::<i64>("GATEWAY_SESSION_TIMEOUT_MINUTES", &minutes)?;
            config.monitor.session_timeout = Duration::minutes(minutes);
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.backend.base_url.trim().is_empty() {
            return Err(config_error("backend.base_url must not be empty"));
        }
        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            return Err(config_error("backend.base_url must be an http(s) URL"));
        }
        if self.backend.request_timeout.is_zero() {
            return Err(config_error("backend.request_timeout must be positive"));
        }
        if self.cookie.name.is_empty() {
            return Err(config_error("cookie.name must not be empty"));
        }
        if !self.gate.login_path.starts_with('/') || !self.gate.protected_prefix.starts_with('/') {
            return Err(config_error("gate paths must start with '/'"));
        }
        if self.monitor.session_timeout <= Duration::zero() {
            return Err(config_error("monitor.session_timeout must be positive"));
        }
        if self.monitor.check_interval <= Duration::zero() {
            return Err(config_error("monitor.check_interval must be positive"));
        }
        Ok(())
    }
}

/// Where the backend lives and how its login page signals failure.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub login_path: String,
    pub logout_path: String,
    /// Any page that requires a session; a 2xx means the cookie is valid.
    pub probe_path: String,
    /// Upper bound for every outbound call.
    ///
    /// Default: 10 seconds
    pub request_timeout: StdDuration,
    pub failure_markers: FailureMarkers,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_owned(),
            login_path: "/login".to_owned(),
            logout_path: "/logout".to_owned(),
            probe_path: "/".to_owned(),
            request_timeout: StdDuration::from_secs(10),
            failure_markers: FailureMarkers::default(),
        }
    }
}

impl BackendConfig {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Body fragments that identify a redisplayed login page.
#[derive(Debug, Clone)]
pub struct FailureMarkers {
    pub phrases: Vec<String>,
    /// Opening and closing tag of the flashed error list.
    pub error_list: Option<(String, String)>,
}

impl Default for FailureMarkers {
    fn default() -> Self {
        Self {
            phrases: vec![
                "Invalid username or password".to_owned(),
                "get_flashed_messages".to_owned(),
            ],
            error_list: Some(("<ul>".to_owned(), "</ul>".to_owned())),
        }
    }
}

impl FailureMarkers {
    pub fn matches(&self, body: &str) -> bool {
        if self.phrases.iter().any(|p| body.contains(p.as_str())) {
            return true;
        }
        self.error_list
            .as_ref()
            .is_some_and(|(open, close)| body.contains(open.as_str()) && body.contains(close.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    None,
    #[default]
    Lax,
    Strict,
}

/// Attributes of the session cookie the gateway clears on logout.
///
/// These must match what the backend set, otherwise the browser keeps the
/// original cookie alongside the cleared one.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub path: String,
    pub domain: Option<String>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_owned(),
            path: "/".to_owned(),
            domain: None,
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GateConfig {
    pub protected_prefix: String,
    pub login_path: String,
    /// Non-page routes that are never gated.
    pub excluded_prefixes: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            protected_prefix: "/admin".to_owned(),
            login_path: "/admin/login".to_owned(),
            excluded_prefixes: vec![
                "/api".to_owned(),
                "/auth".to_owned(),
                "/_next/static".to_owned(),
                "/_next/image".to_owned(),
                "/favicon.ico".to_owned(),
                "/public".to_owned(),
            ],
        }
    }
}

/// Client session monitor settings.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Default: 8 hours
    pub session_timeout: Duration,
    /// Default: 5 minutes
    pub check_interval: Duration,
    pub storage_key: String,
    /// Also ask the status endpoint on every check while the clock is fresh.
    pub revalidate_with_backend: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            session_timeout: Duration::hours(8),
            check_interval: Duration::minutes(5),
            storage_key: "adminLoginTime".to_owned(),
            revalidate_with_backend: false,
        }
    }
}

fn config_error(msg: &str) -> GatewayError {
    GatewayError::ConfigurationError(msg.to_owned())
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, GatewayError> {
    value
        .trim()
        .parse()
        .map_err(|_| GatewayError::ConfigurationError(format!("{key} must be a number")))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, GatewayError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(GatewayError::ConfigurationError(format!(
            "{key} must be a boolean"
        ))),
    }
}
