//! Bounded polling for eventually consistent searches
//!
//! Logs and signals show up in search results some time after the event that
//! produced them. `Poller` repeats a lookup at a fixed interval until it
//! yields data or the attempt budget runs out. The interval never grows, so
//! the worst-case wait of a test is `(max_attempts - 1) * delay` plus the
//! lookups themselves.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};
use watchpost_core::dto::logs::LogsListResponse;
use watchpost_core::dto::signals::SignalListResponse;

use crate::error::{FixtureError, Result};

/// A search response that may or may not carry data
pub trait PollResult {
    fn is_empty(&self) -> bool;
}

impl PollResult for LogsListResponse {
    fn is_empty(&self) -> bool {
        LogsListResponse::is_empty(self)
    }
}

impl PollResult for SignalListResponse {
    fn is_empty(&self) -> bool {
        SignalListResponse::is_empty(self)
    }
}

impl<T> PollResult for Vec<T> {
    fn is_empty(&self) -> bool {
        <[T]>::is_empty(self)
    }
}

/// Attempt budget and fixed inter-attempt delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrySchedule {
    max_attempts: u32,
    delay: Duration,
}

impl RetrySchedule {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(10);

    /// Fails with `InvalidSchedule` when `max_attempts` is zero
    pub fn new(max_attempts: u32, delay: Duration) -> Result<Self> {
        if max_attempts == 0 {
            return Err(FixtureError::InvalidSchedule(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(Self { max_attempts, delay })
    }

    /// A single attempt, no delay
    pub fn once() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for RetrySchedule {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            delay: Self::DEFAULT_DELAY,
        }
    }
}

/// Which failed lookups are worth another attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetryOn {
    /// Retry after any error
    #[default]
    AnyError,
    /// Retry empty results and transient API failures; propagate everything
    /// else (bad credentials, malformed queries) on first sight
    TransientOnly,
}

impl RetryOn {
    pub fn should_retry(&self, err: &FixtureError) -> bool {
        match self {
            Self::AnyError => true,
            Self::TransientOnly => match err {
                FixtureError::LookupFailed { .. } => true,
                FixtureError::Client(e) => e.is_transient(),
                FixtureError::Io(_) | FixtureError::InvalidSchedule(_) => false,
            },
        }
    }
}

/// Repeats a lookup until it returns data
#[derive(Debug, Clone, Copy, Default)]
pub struct Poller {
    schedule: RetrySchedule,
    retry_on: RetryOn,
}

impl Poller {
    pub fn new(schedule: RetrySchedule) -> Self {
        Self {
            schedule,
            retry_on: RetryOn::default(),
        }
    }

    pub fn with_retry_on(mut self, retry_on: RetryOn) -> Self {
        self.retry_on = retry_on;
        self
    }

    pub fn schedule(&self) -> RetrySchedule {
        self.schedule
    }

    pub fn retry_on(&self) -> RetryOn {
        self.retry_on
    }

    /// Calls `query_fn` until it yields a non-empty result
    ///
    /// An empty result counts as a lookup failure for `query`. Failures are
    /// retried according to `RetryOn`, sleeping the schedule's delay between
    /// attempts. Once the budget is spent the last failure is returned; a
    /// lookup failure then reports the total number of attempts.
    pub async fn poll_until_non_empty<T, F, Fut>(&self, query: &str, mut query_fn: F) -> Result<T>
    where
        T: PollResult,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.schedule.max_attempts;
        let mut attempt = 0u32;

        loop {
            attempt += 1;

            let err = match query_fn().await {
                Ok(result) if !result.is_empty() => {
                    if attempt > 1 {
                        info!(query, attempt, "data observed after {} attempt(s)", attempt);
                    }
                    return Ok(result);
                }
                Ok(_) => FixtureError::lookup_failed(query, attempt),
                Err(e) => e,
            };

            if !self.retry_on.should_retry(&err) {
                warn!(query, attempt, "lookup failed permanently: {}", err);
                return Err(err);
            }

            if attempt >= max_attempts {
                warn!(query, attempt, "giving up: {}", err);
                return Err(match err {
                    FixtureError::LookupFailed { query, .. } => FixtureError::LookupFailed {
                        query,
                        attempts: attempt,
                    },
                    other => other,
                });
            }

            debug!(query, attempt, max_attempts, "no data yet: {}", err);
            if !self.schedule.delay.is_zero() {
                sleep(self.schedule.delay).await;
            }
        }
    }
}

/// Polls `query_fn` with the given schedule, retrying after any error
pub async fn poll_until_non_empty<T, F, Fut>(
    query: &str,
    schedule: RetrySchedule,
    query_fn: F,
) -> Result<T>
where
    T: PollResult,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    Poller::new(schedule).poll_until_non_empty(query, query_fn).await
}
