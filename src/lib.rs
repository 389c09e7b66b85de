//! Authentication gateway for session-cookie backends.
//!
//! The gateway sits between a browser and a backend that signals login
//! success through redirects and page redisplay. It proxies login, logout and
//! status checks, gates protected pages on cookie presence, and ships a
//! client-side session monitor that expires the local session on its own
//! clock.

pub mod actions;
pub mod api;
pub mod backend;
#[cfg(feature = "client")]
pub mod client;
pub mod config;
pub mod events;
pub mod gate;
mod secret;
pub mod session;

use std::fmt;

pub use backend::{BackendAuthClient, FailureHint, HttpBackendClient, LoginOutcome, LogoutOutcome};
#[cfg(feature = "mocks")]
pub use backend::{BackendCall, MockBackendClient};
pub use config::GatewayConfig;
pub use events::register_event_listeners;
pub use gate::GateDecision;
pub use secret::{SecretString, SessionCredential};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    MissingCredentials,
    InvalidCredentials,
    BackendUnavailable(String),
    ConfigurationError(String),
    Internal(String),
}

impl GatewayError {
    /// Message safe to show to callers.
    ///
    /// Never carries backend detail: credential and ambiguous rejections share
    /// one message, and transport failures do not name the backend.
    pub fn public_message(&self) -> &'static str {
        match self {
            GatewayError::MissingCredentials => "Username and password are required",
            GatewayError::InvalidCredentials => "Invalid username or password",
            GatewayError::BackendUnavailable(_) => "Login failed",
            GatewayError::ConfigurationError(_) | GatewayError::Internal(_) => {
                "Internal server error"
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::MissingCredentials => "MISSING_CREDENTIALS",
            GatewayError::InvalidCredentials => "INVALID_CREDENTIALS",
            GatewayError::BackendUnavailable(_) => "LOGIN_FAILED",
            GatewayError::ConfigurationError(_) => "CONFIGURATION_ERROR",
            GatewayError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl std::error::Error for GatewayError {}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::MissingCredentials => write!(f, "Username and password are required"),
            GatewayError::InvalidCredentials => write!(f, "Invalid username or password"),
            GatewayError::BackendUnavailable(msg) => write!(f, "Backend unavailable: {msg}"),
            GatewayError::ConfigurationError(msg) => write!(f, "Configuration error: {msg}"),
            GatewayError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}
