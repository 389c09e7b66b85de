//! Wrappers for values that must never reach a log line.
//!
//! Passwords pass through the gateway on their way to the backend, and the
//! inbound `Cookie` header carries the backend's session credential. Both are
//! redacted in `Debug` and `Display`.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// A password or other secret string.
///
/// ```rust
/// use enclave_gateway::SecretString;
///
/// let password = SecretString::new("hunter2");
/// assert_eq!(format!("{password:?}"), "SecretString([REDACTED])");
/// assert_eq!(password.expose_secret(), "hunter2");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretString)
    }
}

/// The caller's cookies, forwarded verbatim to the backend.
///
/// The gateway never parses the backend's session token out of this value;
/// it is an opaque `Cookie` header that the backend alone can judge.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredential(String);

impl SessionCredential {
    /// Joins one or more inbound `Cookie` header values.
    ///
    /// Returns `None` when nothing non-blank was presented.
    pub fn from_cookie_headers<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let joined = values
            .into_iter()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join("; ");

        if joined.is_empty() {
            None
        } else {
            Some(Self(joined))
        }
    }

    /// Value for the outbound `Cookie` header.
    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionCredential([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_string_redacted() {
        let secret = SecretString::new("my_password");
        assert_eq!(format!("{secret:?}"), "SecretString([REDACTED])");
        assert_eq!(format!("{secret}"), "[REDACTED]");
        assert_eq!(secret.expose_secret(), "my_password");
    }

    #[test]
    fn test_secret_string_deserialize() {
        let secret: SecretString = serde_json::from_str("\"pw\"").unwrap();
        assert_eq!(secret.expose_secret(), "pw");
    }

    #[test]
    fn test_credential_joins_header_values() {
        let credential =
            SessionCredential::from_cookie_headers(["session=abc", " remember_token=xyz "]).unwrap();
        assert_eq!(credential.expose_secret(), "session=abc; remember_token=xyz");
    }

    #[test]
    fn test_credential_absent_when_blank() {
        assert!(SessionCredential::from_cookie_headers(std::iter::empty::<&str>()).is_none());
        assert!(SessionCredential::from_cookie_headers(["", "  "]).is_none());
    }

    #[test]
    fn test_credential_debug_redacted() {
        let credential = SessionCredential::from_cookie_headers(["session=abc"]).unwrap();
        assert_eq!(format!("{credential:?}"), "SessionCredential([REDACTED])");
    }
}
