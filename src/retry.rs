//! Retry-augmented poll task — bounded exponential backoff.
//!
//! DESIGN
//! ======
//! [`RetryingPoller`] wraps any [`PollTask`] and is itself a [`PollTask`],
//! so it slots directly into a [`PollingController`](crate::poller)
//! schedule. A failed run is retried after `retry_delay * 1.5^n` (n = the
//! consecutive-failure count) until either a run succeeds or `retry_count`
//! is exhausted, at which point the last error surfaces to the controller
//! and no further automatic retry happens until the next regular tick.
//!
//! Backoff sleeps execute inside the controller's tick, so stopping the
//! controller cancels any pending retry timer. Retry state is owned per
//! instance and observable through [`RetryingPoller::snapshot`].

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use time::OffsetDateTime;
use tracing::warn;

use crate::poller::{PollTask, TaskError};

pub const DEFAULT_RETRY_COUNT: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(2_000);

#[derive(Debug, Clone, Copy)]
pub struct RetryOptions {
    /// Consecutive failures tolerated before the error surfaces.
    pub retry_count: u32,
    /// Base delay; attempt `n` waits `retry_delay * 1.5^n`.
    pub retry_delay: Duration,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self { retry_count: DEFAULT_RETRY_COUNT, retry_delay: DEFAULT_RETRY_DELAY }
    }
}

/// Observable retry state. Reset on any successful run.
#[derive(Debug, Clone, Default)]
pub struct RetrySnapshot {
    pub failure_count: u32,
    /// True only while a backoff timer is pending.
    pub is_retrying: bool,
    pub last_error: Option<String>,
    pub last_updated: Option<OffsetDateTime>,
}

pub struct RetryingPoller {
    inner: Arc<dyn PollTask>,
    options: RetryOptions,
    state: Mutex<RetrySnapshot>,
}

impl RetryingPoller {
    #[must_use]
    pub fn new(inner: Arc<dyn PollTask>, options: RetryOptions) -> Self {
        Self { inner, options, state: Mutex::new(RetrySnapshot::default()) }
    }

    #[must_use]
    pub fn snapshot(&self) -> RetrySnapshot {
        self.lock().clone()
    }

    /// Immediate out-of-band invocation of the wrapped task. Leaves the
    /// schedule and the retry state machine untouched.
    ///
    /// # Errors
    ///
    /// Propagates the wrapped task's error unchanged.
    pub async fn refresh(&self) -> Result<(), TaskError> {
        self.inner.run().await
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RetrySnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_success(&self) {
        let mut state = self.lock();
        state.failure_count = 0;
        state.is_retrying = false;
        state.last_error = None;
        state.last_updated = Some(OffsetDateTime::now_utc());
    }

    fn record_failure(&self, error: &TaskError) -> u32 {
        let mut state = self.lock();
        state.failure_count += 1;
        state.last_error = Some(error.to_string());
        state.failure_count
    }

    fn set_retrying(&self, retrying: bool) {
        self.lock().is_retrying = retrying;
    }
}

/// Delay before the attempt following `failures` consecutive failures.
#[must_use]
pub fn backoff_delay(base: Duration, failures: u32) -> Duration {
    base.mul_f64(1.5_f64.powi(failures.min(i32::MAX as u32) as i32))
}

#[async_trait]
impl PollTask for RetryingPoller {
    async fn run(&self) -> Result<(), TaskError> {
        loop {
            match self.inner.run().await {
                Ok(()) => {
                    self.record_success();
                    return Ok(());
                }
                Err(e) => {
                    let failures = self.record_failure(&e);
                    if failures >= self.options.retry_count {
                        self.set_retrying(false);
                        warn!(failures, error = %e, "retries exhausted; surfacing error");
                        return Err(e);
                    }
                    let delay = backoff_delay(self.options.retry_delay, failures);
                    warn!(failures, delay_ms = delay.as_millis() as u64, "poll failed; backing off");
                    self.set_retrying(true);
                    tokio::time::sleep(delay).await;
                    self.set_retrying(false);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "retry_test.rs"]
mod tests;
