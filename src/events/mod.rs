//! Event system for gateway actions.
//!
//! Login, logout, status checks and client-side expiry all fire a
//! [`GatewayEvent`]. With no listeners registered the events are dropped.
//!
//! ```rust,ignore
//! use enclave_gateway::register_event_listeners;
//! use enclave_gateway::events::listeners::LoggingListener;
//!
//! register_event_listeners(|registry| {
//!     registry.listen(LoggingListener::new());
//! });
//! ```

mod event;
mod listener;
mod registry;

pub mod listeners;

pub use event::GatewayEvent;
pub use listener::Listener;
pub use registry::{EventRegistry, dispatch, register_event_listeners};
