use async_trait::async_trait;

use crate::events::{GatewayEvent, Listener};

/// Logs gateway events through the `log` crate.
pub struct LoggingListener {
    level: log::Level,
}

impl LoggingListener {
    /// INFO level.
    pub fn new() -> Self {
        Self {
            level: log::Level::Info,
        }
    }

    pub fn with_level(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Listener for LoggingListener {
    async fn handle(&self, event: &GatewayEvent) {
        log::log!(
            target: "enclave_gateway::events",
            self.level,
            "event={} {:?}",
            event.name(),
            event
        );
    }
}
