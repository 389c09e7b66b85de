use async_trait::async_trait;

use crate::events::{GatewayEvent, Listener};

/// Emits gateway events as `tracing` events. Requires the `tracing` feature.
pub struct TracingListener;

#[async_trait]
impl Listener for TracingListener {
    async fn handle(&self, event: &GatewayEvent) {
        tracing::info!(
            target: "enclave_gateway::events",
            event_name = event.name(),
            ?event,
            "gateway event"
        );
    }
}
