//! Edge gate for protected pages.
//!
//! A coarse check that runs before any protected page renders: a session
//! cookie must be present. Its value is never validated here; that would cost
//! a backend round-trip on every navigation. Real validation happens at the
//! status endpoint and on every backend-proxied action.

use crate::backend::BackendAuthClient;
use crate::config::{GateConfig, GatewayConfig};
use crate::session::has_session_cookie;
use crate::SessionCredential;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// The path is outside the gate's scope.
    Bypass,
    /// Protected path, session cookie present.
    Allow,
    /// Protected path without a session cookie; the value is the login path.
    Redirect(String),
}

impl GateDecision {
    pub fn is_redirect(&self) -> bool {
        matches!(self, GateDecision::Redirect(_))
    }
}

/// Whether `path` is `prefix` itself or sits below it on a segment boundary.
fn is_under(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || prefix.ends_with('/'),
        None => false,
    }
}

/// Whether the gate applies to `path` at all.
pub fn is_protected(path: &str, gate: &GateConfig) -> bool {
    if gate.excluded_prefixes.iter().any(|p| is_under(path, p)) {
        return false;
    }
    if is_under(path, &gate.login_path) {
        return false;
    }
    is_under(path, &gate.protected_prefix)
}

/// Decides a navigation from the path and the raw `Cookie` header values.
pub fn evaluate<'a>(
    path: &str,
    cookie_headers: impl IntoIterator<Item = &'a str>,
    config: &GatewayConfig,
) -> GateDecision {
    if !is_protected(path, &config.gate) {
        return GateDecision::Bypass;
    }

    if has_session_cookie(cookie_headers, &config.cookie.name) {
        GateDecision::Allow
    } else {
        log::debug!(target: "enclave_gateway::gate", "msg=\"no session cookie, redirecting\" path=\"{path}\"");
        GateDecision::Redirect(config.gate.login_path.clone())
    }
}

/// Strict variant for pages that cannot tolerate a stale cookie.
///
/// Runs the presence check, then asks the backend. Any failure redirects.
pub async fn require_session<'a, B: BackendAuthClient>(
    backend: &B,
    path: &str,
    cookie_headers: impl IntoIterator<Item = &'a str> + Clone,
    config: &GatewayConfig,
) -> GateDecision {
    match evaluate(path, cookie_headers.clone(), config) {
        GateDecision::Allow => {}
        other => return other,
    }

    let Some(credential) = SessionCredential::from_cookie_headers(cookie_headers) else {
        return GateDecision::Redirect(config.gate.login_path.clone());
    };

    if backend.check_status(&credential).await {
        GateDecision::Allow
    } else {
        log::info!(target: "enclave_gateway::gate", "msg=\"backend rejected session\" path=\"{path}\"");
        GateDecision::Redirect(config.gate.login_path.clone())
    }
}
