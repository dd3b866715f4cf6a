//! Fixed-interval polling with a hard deadline
//!
//! Built on the tokio clock so tests can run on paused time.

use std::time::Duration;

use thiserror::Error;
use tokio::time::{sleep, Instant};
use tracing::trace;

/// Errors produced by polling helpers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PollError {
    /// The poll configuration is unusable
    #[error("Invalid poll configuration: {message}")]
    InvalidConfiguration { message: String },

    /// The condition was not met before the deadline
    #[error("Condition not met within {timeout:?} ({attempts} attempts)")]
    TimedOut { timeout: Duration, attempts: u32 },
}

/// Interval and overall timeout for a bounded wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollConfig {
    /// # Errors
    /// Rejects a zero interval, which would spin without yielding.
    pub fn new(interval: Duration, timeout: Duration) -> Result<Self, PollError> {
        if interval.is_zero() {
            return Err(PollError::InvalidConfiguration {
                message: "interval must be greater than zero".to_string(),
            });
        }
        Ok(Self { interval, timeout })
    }

    pub fn from_millis(interval_ms: u64, timeout_ms: u64) -> Result<Self, PollError> {
        Self::new(Duration::from_millis(interval_ms), Duration::from_millis(timeout_ms))
    }

    pub fn start(self) -> Poller {
        Poller::start(self)
    }
}

/// Drives one bounded wait.
///
/// ```ignore
/// let mut poller = config.start();
/// loop {
///     if condition().await {
///         break;
///     }
///     if !poller.tick().await {
///         return Err(poller.timed_out());
///     }
/// }
/// ```
/// Deadline used when `started + timeout` does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

#[derive(Debug)]
pub struct Poller {
    config: PollConfig,
    started: Instant,
    deadline: Instant,
    attempts: u32,
}

impl Poller {
    pub fn start(config: PollConfig) -> Self {
        let started = Instant::now();
        let deadline = started
            .checked_add(config.timeout)
            .or_else(|| started.checked_add(FAR_FUTURE))
            .unwrap_or(started);
        Self { config, started, deadline, attempts: 0 }
    }

    /// Sleep until the next check, never past the deadline.
    ///
    /// Returns `false` once the deadline has passed, meaning the caller should
    /// stop polling.
    pub async fn tick(&mut self) -> bool {
        let now = Instant::now();
        if now >= self.deadline {
            trace!(attempts = self.attempts, "poll.deadline_reached");
            return false;
        }
        let wait = self.config.interval.min(self.deadline - now);
        sleep(wait).await;
        self.attempts += 1;
        true
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Error describing this wait's timeout.
    pub fn timed_out(&self) -> PollError {
        PollError::TimedOut { timeout: self.config.timeout, attempts: self.attempts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_interval_is_rejected() {
        assert!(matches!(
            PollConfig::new(Duration::ZERO, Duration::from_secs(1)),
            Err(PollError::InvalidConfiguration { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_until_deadline() {
        let mut poller = PollConfig::from_millis(250, 1000).unwrap().start();
        let mut ticks = 0;
        while poller.tick().await {
            ticks += 1;
        }
        assert_eq!(ticks, 4);
        assert!(poller.is_expired());
        assert_eq!(poller.elapsed(), Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn final_tick_is_clamped_to_deadline() {
        let mut poller = PollConfig::from_millis(400, 1000).unwrap().start();
        while poller.tick().await {}
        assert_eq!(poller.attempts(), 3);
        assert_eq!(poller.elapsed(), Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_timeout_never_sleeps() {
        let mut poller = PollConfig::from_millis(250, 0).unwrap().start();
        assert!(!poller.tick().await);
        assert_eq!(poller.timed_out(), PollError::TimedOut { timeout: Duration::ZERO, attempts: 0 });
    }

    #[tokio::test(start_paused = true)]
    async fn unbounded_timeout_keeps_polling() {
        let mut poller =
            PollConfig::new(Duration::from_millis(250), Duration::from_secs(u64::MAX)).unwrap().start();
        assert!(!poller.is_expired());
        assert!(poller.tick().await);
        assert_eq!(poller.elapsed(), Duration::from_millis(250));
    }
}
