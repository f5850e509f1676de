//! Polling controller — fixed-interval repeating task scheduler.
//!
//! DESIGN
//! ======
//! Each widget-style consumer owns one [`PollingController`] instance with
//! its own timer and flags; there is no ambient module state, so any number
//! of controllers coexist. A controller runs its task, sleeps `interval`,
//! and repeats at the same fixed cadence regardless of task duration or
//! outcome. Ticks from one controller never overlap: the next sleep only
//! starts after the previous run settles.
//!
//! Pausing is driven by a shared [`PollGate`] (the server-side analogue of
//! page visibility): when the gate goes hidden, the pending timer is
//! cancelled and the controller parks; when it comes back, the task runs
//! once immediately and the fixed schedule resumes.
//!
//! ERROR HANDLING
//! ==============
//! Task errors never stop the schedule. They are forwarded to an optional
//! `on_error` hook, or logged at warn level when no hook is installed.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Error produced by a poll task run.
pub type TaskError = Box<dyn std::error::Error + Send + Sync>;

/// A unit of work invoked on every tick.
#[async_trait]
pub trait PollTask: Send + Sync + 'static {
    async fn run(&self) -> Result<(), TaskError>;
}

type ErrorHook = Arc<dyn Fn(&TaskError) + Send + Sync>;

// =============================================================================
// OPTIONS
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub struct PollOptions {
    /// Fixed delay between ticks.
    pub interval: Duration,
    /// Run the task once on `start()` before the first scheduled tick.
    pub immediate: bool,
    /// Park the schedule while the gate reports hidden.
    pub pause_when_hidden: bool,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self { interval: Duration::from_secs(30), immediate: false, pause_when_hidden: true }
    }
}

// =============================================================================
// POLL GATE
// =============================================================================

/// Shared hidden/visible signal subscribed to by controllers.
///
/// Consumers flip it when their surface stops being watched; every
/// controller built against the same gate reacts independently.
#[derive(Clone)]
pub struct PollGate {
    tx: Arc<watch::Sender<bool>>,
}

impl PollGate {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn set_hidden(&self, hidden: bool) {
        self.tx.send_replace(hidden);
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl Default for PollGate {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

pub struct PollingController {
    task: Arc<dyn PollTask>,
    options: PollOptions,
    gate: PollGate,
    on_error: Option<ErrorHook>,
    active: Arc<AtomicBool>,
    paused: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl PollingController {
    #[must_use]
    pub fn new(task: Arc<dyn PollTask>, options: PollOptions, gate: PollGate) -> Self {
        Self {
            task,
            options,
            gate,
            on_error: None,
            active: Arc::new(AtomicBool::new(false)),
            paused: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    /// Install an error hook. Replaces warn-level logging for task failures.
    #[must_use]
    pub fn with_on_error(mut self, hook: impl Fn(&TaskError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(hook));
        self
    }

    /// Begin the schedule. No-op if already active.
    pub fn start(&mut self) {
        if self.active.swap(true, Ordering::SeqCst) {
            return;
        }

        let mut hidden_rx = self.gate.subscribe();
        let starting_paused = self.options.pause_when_hidden && *hidden_rx.borrow_and_update();
        self.paused.store(starting_paused, Ordering::SeqCst);

        let task = Arc::clone(&self.task);
        let on_error = self.on_error.clone();
        let paused = Arc::clone(&self.paused);
        let options = self.options;

        debug!(interval_ms = options.interval.as_millis() as u64, starting_paused, "poller started");

        self.handle = Some(tokio::spawn(async move {
            if options.immediate && !paused.load(Ordering::SeqCst) {
                run_task(&task, on_error.as_ref()).await;
            }

            loop {
                if paused.load(Ordering::SeqCst) {
                    // Park until the gate reports visible again. The watch
                    // sender lives in the owning controller, so a closed
                    // channel means teardown.
                    loop {
                        if hidden_rx.changed().await.is_err() {
                            return;
                        }
                        if !*hidden_rx.borrow_and_update() {
                            break;
                        }
                    }
                    paused.store(false, Ordering::SeqCst);
                    // One immediate catch-up run, then the fixed schedule.
                    run_task(&task, on_error.as_ref()).await;
                    continue;
                }

                tokio::select! {
                    () = tokio::time::sleep(options.interval) => {
                        run_task(&task, on_error.as_ref()).await;
                    }
                    changed = hidden_rx.changed(), if options.pause_when_hidden => {
                        if changed.is_err() {
                            return;
                        }
                        if *hidden_rx.borrow_and_update() {
                            // Pending timer is dropped with this select arm.
                            paused.store(true, Ordering::SeqCst);
                        }
                    }
                }
            }
        }));
    }

    /// Halt the schedule and cancel any pending timer. Idempotent; safe to
    /// call without a prior `start()`.
    pub fn stop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
        self.paused.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("poller stopped");
        }
    }

    /// Run the task exactly once, outside the schedule. Does not reset or
    /// disturb the running timer.
    pub async fn poll(&self) {
        run_task(&self.task, self.on_error.as_ref()).await;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }
}

impl Drop for PollingController {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_task(task: &Arc<dyn PollTask>, on_error: Option<&ErrorHook>) {
    if let Err(e) = task.run().await {
        match on_error {
            Some(hook) => hook(&e),
            None => warn!(error = %e, "poll task failed"),
        }
    }
}

#[cfg(test)]
#[path = "poller_test.rs"]
mod tests;
