use std::sync::OnceLock;

use super::{GatewayEvent, Listener};

static REGISTRY: OnceLock<EventRegistry> = OnceLock::new();

pub struct EventRegistry {
    listeners: Vec<Box<dyn Listener>>,
}

impl EventRegistry {
    fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Listeners are called in registration order.
    pub fn listen(&mut self, listener: impl Listener) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    async fn dispatch(&self, event: &GatewayEvent) {
        for listener in &self.listeners {
            listener.handle(event).await;
        }
    }
}

/// Registers listeners once at startup. Later calls are ignored with a warning.
pub fn register_event_listeners<F>(f: F)
where
    F: FnOnce(&mut EventRegistry),
{
    let mut registry = EventRegistry::new();
    f(&mut registry);
    if REGISTRY.set(registry).is_err() {
        log::warn!(
            target: "enclave_gateway",
            "register_event_listeners called more than once, ignoring"
        );
    }
}

/// No-op when nothing is registered.
pub async fn dispatch(event: GatewayEvent) {
    if let Some(registry) = REGISTRY.get() {
        registry.dispatch(&event).await;
    }
}
