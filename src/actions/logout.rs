use chrono::Utc;

use crate::SessionCredential;
use crate::backend::{BackendAuthClient, LogoutOutcome};
use crate::events::{GatewayEvent, dispatch};

/// Best-effort backend logout.
///
/// Never fails: the caller clears its local cookie whatever this returns.
pub struct LogoutAction<B: BackendAuthClient> {
    backend: B,
}

impl<B: BackendAuthClient> LogoutAction<B> {
    pub fn new(backend: B) -> Self {
        LogoutAction { backend }
    }

    /// Returns whether the backend acknowledged the logout.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "logout", skip_all)
    )]
    pub async fn execute(&self, credential: Option<&SessionCredential>) -> bool {
        let acknowledged = match credential {
            Some(credential) => match self.backend.logout(credential).await {
                LogoutOutcome::Acknowledged => true,
                LogoutOutcome::Failed(detail) => {
                    log::warn!(target: "enclave_gateway", "msg=\"backend logout failed\" error=\"{detail}\"");
                    false
                }
            },
            None => {
                log::debug!(target: "enclave_gateway", "msg=\"logout without cookies, backend not called\"");
                false
            }
        };

        dispatch(GatewayEvent::LogoutCompleted {
            backend_acknowledged: acknowledged,
            at: Utc::now(),
        })
        .await;

        log::info!(target: "enclave_gateway", "msg=\"logout\" backend_acknowledged={acknowledged}");

        acknowledged
    }
}
