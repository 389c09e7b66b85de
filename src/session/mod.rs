//! Client-side session model.
//!
//! The backend owns whether the session cookie is valid. The client owns a
//! login timestamp and decides, on its own clock, when to stop presenting the
//! cookie. Nothing here talks to the backend directly; the
//! [`SessionMonitor`] reaches it through a [`SessionHost`].

mod clock;
mod cookie;
mod memory_store;
mod monitor;
mod store;
mod timestamp;

pub use clock::{Clock, ManualClock, SystemClock, is_stale};
pub use cookie::{find_cookie, has_session_cookie, removal_cookie};
pub use memory_store::InMemoryTimestampStore;
pub use monitor::{
    ExpiryReason, MonitorState, PageEvent, SessionHost, SessionMonitor, Visibility,
};
#[cfg(feature = "mocks")]
pub use monitor::MockSessionHost;
pub use store::TimestampStore;
pub use timestamp::{clear_login, is_session_valid, login_time, record_login};
