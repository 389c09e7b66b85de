//! Login timestamp helpers.

use super::clock::{Clock, is_stale};
use super::store::TimestampStore;
use crate::config::MonitorConfig;

/// Writes the login instant. Call once the gateway reports a successful login.
pub fn record_login(store: &impl TimestampStore, clock: &impl Clock, config: &MonitorConfig) -> i64 {
    let now = clock.now_millis();
    store.set(&config.storage_key, now.to_string());
    now
}

/// Reads the login instant. An unparsable value counts as absent.
pub fn login_time(store: &impl TimestampStore, config: &MonitorConfig) -> Option<i64> {
    let raw = store.get(&config.storage_key)?;
    match raw.trim().parse::<i64>() {
        Ok(millis) => Some(millis),
        Err(_) => {
            log::warn!(target: "enclave_gateway::session", "msg=\"unreadable login timestamp\"");
            None
        }
    }
}

pub fn clear_login(store: &impl TimestampStore, config: &MonitorConfig) {
    store.remove(&config.storage_key);
}

/// Whether a login timestamp exists and is within the session timeout.
pub fn is_session_valid(
    store: &impl TimestampStore,
    clock: &impl Clock,
    config: &MonitorConfig,
) -> bool {
    login_time(store, config)
        .is_some_and(|at| !is_stale(at, clock.now_millis(), config.session_timeout))
}
