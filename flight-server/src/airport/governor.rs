//! Rate governor for outbound airport searches.
//!
//! Two rules gate a remote call: a minimum interval since the previous
//! call, and an hourly window whose call count is tracked against a soft
//! cap. Only the interval blocks; the hourly count is reported and logged
//! but never refuses a call.
//!
//! State sits behind a mutex and every read-modify-write happens inside a
//! single lock scope, so concurrent lookups on a multi-threaded runtime see
//! a consistent governor. The lock is never held across an `.await`.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::warn;

/// Default minimum time between remote calls.
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(2000);

/// Default accounting window.
const DEFAULT_WINDOW: Duration = Duration::from_secs(60 * 60);

/// Default soft cap on calls per window.
const DEFAULT_SOFT_CAP: u32 = 50;

/// Default extra delay applied after the provider answers 429.
const DEFAULT_PENALTY: Duration = Duration::from_secs(10);

/// Configuration for the rate governor.
#[derive(Debug, Clone)]
pub struct GovernorConfig {
    /// Minimum time between two remote calls
    pub min_interval: Duration,
    /// Length of the call-counting window
    pub window: Duration,
    /// Calls per window above which a warning is logged
    pub soft_cap: u32,
    /// Extra deferral after a 429
    pub penalty: Duration,
}

impl GovernorConfig {
    /// Set the minimum interval.
    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }

    /// Set the window length.
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Set the soft cap.
    pub fn with_soft_cap(mut self, cap: u32) -> Self {
        self.soft_cap = cap;
        self
    }

    /// Set the 429 penalty.
    pub fn with_penalty(mut self, penalty: Duration) -> Self {
        self.penalty = penalty;
        self
    }
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            min_interval: DEFAULT_MIN_INTERVAL,
            window: DEFAULT_WINDOW,
            soft_cap: DEFAULT_SOFT_CAP,
            penalty: DEFAULT_PENALTY,
        }
    }
}

/// Why the governor refused a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GovernorRejection {
    /// The previous call (plus any penalty) is too recent
    #[error("next call allowed in {retry_after:?}")]
    TooSoon { retry_after: Duration },
}

/// Proof that a call was admitted, carrying its position in the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallTicket {
    pub call_count: u32,
    pub soft_cap: u32,
}

impl CallTicket {
    /// Whether this call went past the soft cap.
    pub fn over_soft_cap(&self) -> bool {
        self.call_count > self.soft_cap
    }
}

/// Point-in-time view of the governor, for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateSnapshot {
    pub call_count: u32,
    pub soft_cap: u32,
    pub window_reset_at: Instant,
    /// Earliest instant a remote call will be admitted, if one has been made
    pub next_allowed_at: Option<Instant>,
}

#[derive(Debug, Clone, Copy)]
struct RateState {
    /// Last admitted call; pushed into the future by a penalty.
    last_call_at: Option<Instant>,
    call_count: u32,
    window_reset_at: Instant,
}

/// Governs outbound calls to the airport provider.
#[derive(Debug)]
pub struct RateGovernor {
    config: GovernorConfig,
    state: Mutex<RateState>,
}

impl RateGovernor {
    /// Create a governor whose first window starts now.
    pub fn new(config: GovernorConfig) -> Self {
        let state = RateState {
            last_call_at: None,
            call_count: 0,
            window_reset_at: Instant::now() + config.window,
        };
        Self {
            config,
            state: Mutex::new(state),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RateState> {
        // The state is plain data; a panic mid-update cannot leave it unusable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Roll the window over if it has elapsed.
    fn roll_window(&self, state: &mut RateState, now: Instant) {
        if now >= state.window_reset_at {
            state.call_count = 0;
            state.window_reset_at = now + self.config.window;
        }
    }

    /// Ask to make a remote call now.
    ///
    /// On success the call is recorded (it becomes the new `last_call_at` and
    /// counts against the window). On rejection nothing changes.
    pub fn try_acquire(&self) -> Result<CallTicket, GovernorRejection> {
        let now = Instant::now();
        let mut state = self.lock();

        self.roll_window(&mut state, now);

        if let Some(last) = state.last_call_at {
            let next_allowed = last + self.config.min_interval;
            if now < next_allowed {
                return Err(GovernorRejection::TooSoon {
                    retry_after: next_allowed - now,
                });
            }
        }

        state.last_call_at = Some(now);
        state.call_count += 1;

        let ticket = CallTicket {
            call_count: state.call_count,
            soft_cap: self.config.soft_cap,
        };
        if ticket.over_soft_cap() {
            warn!(
                calls = ticket.call_count,
                soft_cap = ticket.soft_cap,
                "airport provider call budget exceeded for this window"
            );
        }
        Ok(ticket)
    }

    /// Defer the next call after the provider answered 429.
    pub fn penalize(&self) {
        let now = Instant::now();
        let mut state = self.lock();
        state.last_call_at = Some(now + self.config.penalty);
    }

    /// Current governor state.
    pub fn snapshot(&self) -> RateSnapshot {
        let now = Instant::now();
        let mut state = self.lock();
        self.roll_window(&mut state, now);
        RateSnapshot {
            call_count: state.call_count,
            soft_cap: self.config.soft_cap,
            window_reset_at: state.window_reset_at,
            next_allowed_at: state.last_call_at.map(|t| t + self.config.min_interval),
        }
    }

    /// The governor's configuration.
    pub fn config(&self) -> &GovernorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    #[test]
    fn default_config() {
        let config = GovernorConfig::default();
        assert_eq!(config.min_interval, Duration::from_millis(2000));
        assert_eq!(config.window, Duration::from_secs(3600));
        assert_eq!(config.soft_cap, 50);
        assert_eq!(config.penalty, Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn first_call_is_admitted() {
        let governor = RateGovernor::new(GovernorConfig::default());
        let ticket = governor.try_acquire().unwrap();
        assert_eq!(ticket.call_count, 1);
        assert!(!ticket.over_soft_cap());
    }

    #[tokio::test(start_paused = true)]
    async fn calls_inside_min_interval_are_rejected() {
        let governor = RateGovernor::new(GovernorConfig::default());
        governor.try_acquire().unwrap();

        advance(Duration::from_millis(500)).await;
        let err = governor.try_acquire().unwrap_err();
        assert_eq!(
            err,
            GovernorRejection::TooSoon {
                retry_after: Duration::from_millis(1500)
            }
        );

        // Rejection does not count as a call.
        assert_eq!(governor.snapshot().call_count, 1);

        advance(Duration::from_millis(1500)).await;
        assert_eq!(governor.try_acquire().unwrap().call_count, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn penalty_defers_next_call() {
        let config = GovernorConfig::default();
        let governor = RateGovernor::new(config.clone());
        let start = Instant::now();

        governor.try_acquire().unwrap();
        governor.penalize();

        let snapshot = governor.snapshot();
        assert_eq!(
            snapshot.next_allowed_at,
            Some(start + config.penalty + config.min_interval)
        );

        advance(config.min_interval).await;
        assert!(governor.try_acquire().is_err());

        advance(config.penalty).await;
        assert!(governor.try_acquire().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn window_resets_call_count() {
        let config = GovernorConfig::default()
            .with_min_interval(Duration::ZERO)
            .with_window(Duration::from_secs(60));
        let governor = RateGovernor::new(config);

        for _ in 0..3 {
            governor.try_acquire().unwrap();
        }
        assert_eq!(governor.snapshot().call_count, 3);

        let before = governor.snapshot().window_reset_at;
        advance(Duration::from_secs(60)).await;

        let ticket = governor.try_acquire().unwrap();
        assert_eq!(ticket.call_count, 1);
        assert_eq!(
            governor.snapshot().window_reset_at,
            before + Duration::from_secs(60)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn soft_cap_does_not_block() {
        let config = GovernorConfig::default()
            .with_min_interval(Duration::ZERO)
            .with_soft_cap(2);
        let governor = RateGovernor::new(config);

        governor.try_acquire().unwrap();
        governor.try_acquire().unwrap();
        let third = governor.try_acquire().unwrap();

        assert_eq!(third.call_count, 3);
        assert!(third.over_soft_cap());
    }
}
