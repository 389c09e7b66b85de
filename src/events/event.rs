use chrono::{DateTime, Utc};

/// Events emitted by the gateway.
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    LoginSucceeded {
        username: String,
        at: DateTime<Utc>,
    },
    LoginFailed {
        username: String,
        reason: String,
        at: DateTime<Utc>,
    },
    /// The local cookie was cleared; the backend may or may not have agreed.
    LogoutCompleted {
        backend_acknowledged: bool,
        at: DateTime<Utc>,
    },
    StatusChecked {
        authenticated: bool,
        at: DateTime<Utc>,
    },
    /// The client session monitor ended the local session.
    SessionExpired {
        reason: String,
        at: DateTime<Utc>,
    },
}

impl GatewayEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoginSucceeded { .. } => "auth.login.success",
            Self::LoginFailed { .. } => "auth.login.failed",
            Self::LogoutCompleted { .. } => "auth.logout.completed",
            Self::StatusChecked { .. } => "auth.status.checked",
            Self::SessionExpired { .. } => "session.expired",
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::LoginSucceeded { at, .. }
            | Self::LoginFailed { at, .. }
            | Self::LogoutCompleted { at, .. }
            | Self::StatusChecked { at, .. }
            | Self::SessionExpired { at, .. } => *at,
        }
    }
}
