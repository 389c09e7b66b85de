use serde::{Deserialize, Serialize};

use crate::{GatewayError, SecretString};

// Request DTOs

/// Login body, accepted as JSON or as a urlencoded form.
///
/// Both fields are optional at the wire level so a missing field becomes a
/// validation error instead of a deserialization rejection.
#[derive(Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<SecretString>,
}

impl LoginRequest {
    /// Builds a request from decoded multipart fields. Unknown fields are
    /// ignored; a repeated field keeps its last value.
    pub fn from_fields(fields: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut request = Self::default();
        for (name, value) in fields {
            match name.as_str() {
                "username" => request.username = Some(value),
                "password" => request.password = Some(SecretString::from(value)),
                _ => {}
            }
        }
        request
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// Response DTOs

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserIdentity>,
}

impl LoginResponse {
    pub fn success(username: impl Into<String>) -> Self {
        Self {
            success: true,
            message: "Login successful".to_owned(),
            user: Some(UserIdentity {
                username: username.into(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

impl LogoutResponse {
    /// The local cookie is cleared either way; the message says whether the
    /// backend agreed.
    pub fn new(backend_acknowledged: bool) -> Self {
        let message = if backend_acknowledged {
            "Logout successful"
        } else {
            "Logged out locally"
        };
        Self {
            success: true,
            message: message.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub authenticated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub code: String,
}

impl From<GatewayError> for ErrorResponse {
    fn from(err: GatewayError) -> Self {
        ErrorResponse {
            success: false,
            message: err.public_message().to_owned(),
            code: err.code().to_owned(),
        }
    }
}
