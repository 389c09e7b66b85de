use async_trait::async_trait;

use super::GatewayEvent;

/// Receives every dispatched [`GatewayEvent`].
///
/// ```rust,ignore
/// use enclave_gateway::events::{GatewayEvent, Listener};
/// use async_trait::async_trait;
///
/// struct FailedLoginCounter;
///
/// #[async_trait]
/// impl Listener for FailedLoginCounter {
///     async fn handle(&self, event: &GatewayEvent) {
///         if let GatewayEvent::LoginFailed { .. } = event {
///             // bump a counter
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    async fn handle(&self, event: &GatewayEvent);
}
