use chrono::Utc;

use crate::SessionCredential;
use crate::backend::BackendAuthClient;
use crate::events::{GatewayEvent, dispatch};

/// Read-only round-trip asking the backend whether the caller's cookies are
/// still good.
pub struct CheckStatusAction<B: BackendAuthClient> {
    backend: B,
}

impl<B: BackendAuthClient> CheckStatusAction<B> {
    pub fn new(backend: B) -> Self {
        CheckStatusAction { backend }
    }

    /// A caller with no cookies is unauthenticated without asking.
    pub async fn execute(&self, credential: Option<&SessionCredential>) -> bool {
        let authenticated = match credential {
            Some(credential) => self.backend.check_status(credential).await,
            None => false,
        };

        dispatch(GatewayEvent::StatusChecked {
            authenticated,
            at: Utc::now(),
        })
        .await;

        authenticated
    }
}
