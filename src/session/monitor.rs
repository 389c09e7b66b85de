//! Client session monitor.
//!
//! A two-state machine (`Active`, `Expired`) that runs beside a protected
//! page. It reads the login timestamp on mount, on a fixed interval, and
//! whenever the page becomes visible again. Once it sees a stale or missing
//! timestamp it ends the local session and sends the user to the login page,
//! whatever the backend still thinks of the cookie.
//!
//! Every check is an idempotent reducer over the same state, so a timer tick
//! racing a visibility change performs the expiry side effects once.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

use super::clock::{Clock, is_stale};
use super::store::TimestampStore;
use super::timestamp::{clear_login, login_time};
use crate::config::MonitorConfig;
use crate::events::{GatewayEvent, dispatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Active,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryReason {
    /// No login timestamp was found.
    MissingTimestamp,
    /// The timestamp is older than the session timeout.
    Stale,
    /// The status endpoint said the cookie is no longer valid.
    Revoked,
    /// The user asked to log out.
    UserLogout,
}

impl ExpiryReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryReason::MissingTimestamp => "missing_timestamp",
            ExpiryReason::Stale => "stale",
            ExpiryReason::Revoked => "revoked",
            ExpiryReason::UserLogout => "user_logout",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Page lifecycle events fed to [`SessionMonitor::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    VisibilityChanged(Visibility),
    /// The page is going away.
    Unload,
}

/// The page the monitor runs in.
#[async_trait]
pub trait SessionHost: Send + Sync {
    /// Best-effort backend logout. Failures are the host's to swallow.
    async fn end_session(&self);

    /// Leave the protected area for the login entry point.
    fn redirect_to_login(&self);

    /// Ask the status endpoint whether the session still holds.
    async fn revalidate(&self) -> bool {
        true
    }
}

pub struct SessionMonitor<C, S, H> {
    clock: C,
    store: S,
    host: H,
    config: MonitorConfig,
    state: Mutex<MonitorState>,
}

impl<C, S, H> SessionMonitor<C, S, H>
where
    C: Clock,
    S: TimestampStore,
    H: SessionHost,
{
    /// Starts `Active`; the first [`check`](Self::check) decides whether that holds.
    pub fn new(clock: C, store: S, host: H, config: MonitorConfig) -> Self {
        Self {
            clock,
            store,
            host,
            config,
            state: Mutex::new(MonitorState::Active),
        }
    }

    pub fn state(&self) -> MonitorState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Evaluates the session once. `Expired` is terminal.
    pub async fn check(&self) -> MonitorState {
        if self.state() == MonitorState::Expired {
            return MonitorState::Expired;
        }

        let reason = match login_time(&self.store, &self.config) {
            None => Some(ExpiryReason::MissingTimestamp),
            Some(at) if is_stale(at, self.clock.now_millis(), self.config.session_timeout) => {
                Some(ExpiryReason::Stale)
            }
            Some(_) => None,
        };

        let reason = match reason {
            None if self.config.revalidate_with_backend => {
                (!self.host.revalidate().await).then_some(ExpiryReason::Revoked)
            }
            other => other,
        };

        match reason {
            Some(reason) => self.expire(reason).await,
            None => MonitorState::Active,
        }
    }

    /// User-initiated logout: clear, end the backend session, redirect.
    pub async fn logout(&self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = MonitorState::Expired;
        clear_login(&self.store, &self.config);
        self.announce(ExpiryReason::UserLogout).await;
        self.host.end_session().await;
        self.host.redirect_to_login();
    }

    /// Drops the timestamp so a reload starts out expired.
    pub fn on_unload(&self) {
        clear_login(&self.store, &self.config);
    }

    /// Drives the monitor until the session expires, the page unloads, or the
    /// event channel closes.
    ///
    /// Checks on entry, then every `check_interval`, and on every
    /// `VisibilityChanged(Visible)`.
    pub async fn run(&self, mut events: mpsc::Receiver<PageEvent>) -> MonitorState {
        if self.check().await == MonitorState::Expired {
            return MonitorState::Expired;
        }

        let period = check_period(&self.config);
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if self.check().await == MonitorState::Expired {
                        return MonitorState::Expired;
                    }
                }
                event = events.recv() => match event {
                    Some(PageEvent::VisibilityChanged(Visibility::Visible)) => {
                        if self.check().await == MonitorState::Expired {
                            return MonitorState::Expired;
                        }
                    }
                    Some(PageEvent::VisibilityChanged(Visibility::Hidden)) => {}
                    Some(PageEvent::Unload) => {
                        self.on_unload();
                        return self.state();
                    }
                    None => return self.state(),
                },
            }
        }
    }

    async fn expire(&self, reason: ExpiryReason) -> MonitorState {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if *state == MonitorState::Expired {
                return MonitorState::Expired;
            }
            *state = MonitorState::Expired;
        }

        clear_login(&self.store, &self.config);
        self.announce(reason).await;

        // with no timestamp there is no session of ours to end; another tab
        // may still be using the backend session
        if reason != ExpiryReason::MissingTimestamp {
            self.host.end_session().await;
        }
        self.host.redirect_to_login();

        MonitorState::Expired
    }

    async fn announce(&self, reason: ExpiryReason) {
        log::info!(target: "enclave_gateway::session", "msg=\"session expired\" reason=\"{}\"", reason.as_str());
        dispatch(GatewayEvent::SessionExpired {
            reason: reason.as_str().to_owned(),
            at: Utc::now(),
        })
        .await;
    }
}

const DEFAULT_CHECK_PERIOD: std::time::Duration = std::time::Duration::from_secs(300);

/// The tick period for [`SessionMonitor::run`]. A zero or negative interval
/// falls back to five minutes, since a zero period would make the ticker panic.
fn check_period(config: &MonitorConfig) -> std::time::Duration {
    match config.check_interval.to_std() {
        Ok(period) if !period.is_zero() => period,
        _ => {
            log::warn!(
                target: "enclave_gateway::session",
                "msg=\"non-positive check interval, using default\" interval_ms={}",
                config.check_interval.num_milliseconds()
            );
            DEFAULT_CHECK_PERIOD
        }
    }
}

/// [`SessionHost`] that counts what the monitor asked of it.
#[cfg(feature = "mocks")]
#[derive(Debug, Default)]
pub struct MockSessionHost {
    pub end_session_calls: std::sync::atomic::AtomicUsize,
    pub redirects: std::sync::atomic::AtomicUsize,
    pub revalidations: std::sync::atomic::AtomicUsize,
    pub backend_valid: std::sync::atomic::AtomicBool,
}

#[cfg(feature = "mocks")]
impl MockSessionHost {
    pub fn new() -> Self {
        Self {
            backend_valid: std::sync::atomic::AtomicBool::new(true),
            ..Default::default()
        }
    }

    pub fn end_session_calls(&self) -> usize {
        self.end_session_calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn redirects(&self) -> usize {
        self.redirects.load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn revalidations(&self) -> usize {
        self.revalidations.load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn set_backend_valid(&self, valid: bool) {
        self.backend_valid
            .store(valid, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(feature = "mocks")]
#[async_trait]
impl SessionHost for MockSessionHost {
    async fn end_session(&self) {
        self.end_session_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }

    fn redirect_to_login(&self) {
        self.redirects
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }

    async fn revalidate(&self) -> bool {
        self.revalidations
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.backend_valid.load(std::sync::atomic::Ordering::SeqCst)
    }
}
