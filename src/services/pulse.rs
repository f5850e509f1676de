//! Pulse service — dashboard summary KPIs and the background refresher.
//!
//! DESIGN
//! ======
//! [`compute`] aggregates headline counts in one pass per table. The
//! refresher keeps `AppState::pulse` warm so `/api/pulse` answers from
//! memory: a [`RetryingPoller`] wraps the refresh task for backoff on
//! transient database errors, and a [`PollingController`] drives it on a
//! fixed interval with gate-based pausing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::poller::{PollGate, PollOptions, PollTask, PollingController, TaskError};
use crate::retry::{RetryOptions, RetryingPoller};
use crate::services::now_rfc3339;
use crate::state::AppState;

// TODO: compute from weekly resolution aggregates once the history table exists.
const RESOLUTION_RATE_CHANGE: f64 = 2.4;

/// Headline dashboard numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PulseSnapshot {
    pub open_cases: i64,
    pub critical_alerts: i64,
    pub pending_inbox: i64,
    pub feed_items: i64,
    /// Percentage of cases resolved, 0 when there are no cases.
    pub resolution_rate: f64,
    /// Week-over-week delta, percentage points.
    pub resolution_rate_change: f64,
    pub generated_at: String,
}

/// Aggregate the current snapshot from the store.
///
/// # Errors
///
/// Returns a database error if any count query fails.
pub async fn compute(pool: &SqlitePool) -> Result<PulseSnapshot, sqlx::Error> {
    let open_cases = scalar(pool, "SELECT COUNT(*) FROM cases WHERE status = 'open'").await?;
    let total_cases = scalar(pool, "SELECT COUNT(*) FROM cases").await?;
    let resolved_cases = scalar(pool, "SELECT COUNT(*) FROM cases WHERE status = 'resolved'").await?;
    let critical_alerts = scalar(pool, "SELECT COUNT(*) FROM alerts WHERE severity = 'critical' AND status = 'active'").await?;
    let pending_inbox = scalar(pool, "SELECT COUNT(*) FROM inbox_items WHERE status = 'pending'").await?;
    let feed_items = scalar(pool, "SELECT COUNT(*) FROM feed_items").await?;

    let resolution_rate = if total_cases == 0 {
        0.0
    } else {
        (resolved_cases as f64 / total_cases as f64) * 100.0
    };

    Ok(PulseSnapshot {
        open_cases,
        critical_alerts,
        pending_inbox,
        feed_items,
        resolution_rate,
        resolution_rate_change: RESOLUTION_RATE_CHANGE,
        generated_at: now_rfc3339(),
    })
}

async fn scalar(pool: &SqlitePool, sql: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(sql).fetch_one(pool).await
}

// =============================================================================
// BACKGROUND REFRESHER
// =============================================================================

/// Poll task that recomputes the snapshot into shared state.
pub struct PulseRefreshTask {
    state: AppState,
}

impl PulseRefreshTask {
    #[must_use]
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl PollTask for PulseRefreshTask {
    async fn run(&self) -> Result<(), TaskError> {
        let snapshot = compute(&self.state.pool).await?;
        debug!(open_cases = snapshot.open_cases, "pulse snapshot refreshed");
        *self.state.pulse.write().await = Some(snapshot);
        Ok(())
    }
}

/// Build and start the pulse refresher. The returned controller owns the
/// schedule; dropping it stops refreshing.
#[must_use]
pub fn spawn_pulse_refresher(state: AppState, gate: &PollGate) -> PollingController {
    let retry = RetryOptions {
        retry_count: state.config.pulse_retry_count,
        retry_delay: Duration::from_millis(state.config.pulse_retry_delay_ms),
    };
    let options = PollOptions {
        interval: Duration::from_millis(state.config.pulse_refresh_ms),
        immediate: true,
        pause_when_hidden: true,
    };
    let task = Arc::new(RetryingPoller::new(Arc::new(PulseRefreshTask::new(state)), retry));

    let mut controller = PollingController::new(task, options, gate.clone());
    controller.start();
    controller
}

#[cfg(test)]
#[path = "pulse_test.rs"]
mod tests;
