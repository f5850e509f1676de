use super::*;

use std::sync::atomic::AtomicU32;

use tokio::time::sleep;

struct CountingTask {
    runs: Arc<AtomicU32>,
}

#[async_trait]
impl PollTask for CountingTask {
    async fn run(&self) -> Result<(), TaskError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct FailingTask {
    attempts: Arc<AtomicU32>,
}

#[async_trait]
impl PollTask for FailingTask {
    async fn run(&self) -> Result<(), TaskError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err("backend unavailable".into())
    }
}

fn counting_controller(options: PollOptions, gate: PollGate) -> (PollingController, Arc<AtomicU32>) {
    let runs = Arc::new(AtomicU32::new(0));
    let task = Arc::new(CountingTask { runs: Arc::clone(&runs) });
    (PollingController::new(task, options, gate), runs)
}

fn options(interval_ms: u64, immediate: bool) -> PollOptions {
    PollOptions { interval: Duration::from_millis(interval_ms), immediate, pause_when_hidden: true }
}

#[tokio::test(start_paused = true)]
async fn start_then_stop_before_first_tick_runs_nothing() {
    for immediate in [false, true] {
        let (mut controller, runs) = counting_controller(options(100, immediate), PollGate::new());
        controller.start();
        controller.stop();
        sleep(Duration::from_secs(1)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0, "immediate={immediate}");
        assert!(!controller.is_active());
    }
}

#[tokio::test(start_paused = true)]
async fn immediate_runs_once_then_keeps_cadence() {
    let (mut controller, runs) = counting_controller(options(100, true), PollGate::new());
    controller.start();
    sleep(Duration::from_millis(1)).await;
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    sleep(Duration::from_millis(110)).await;
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn ticks_follow_fixed_interval() {
    let (mut controller, runs) = counting_controller(options(100, false), PollGate::new());
    controller.start();
    sleep(Duration::from_millis(350)).await;
    assert_eq!(runs.load(Ordering::SeqCst), 3);
    controller.stop();
}

#[tokio::test(start_paused = true)]
async fn start_is_idempotent() {
    let (mut controller, runs) = counting_controller(options(100, false), PollGate::new());
    controller.start();
    controller.start();
    sleep(Duration::from_millis(250)).await;
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn stop_is_idempotent_and_safe_before_start() {
    let (mut controller, runs) = counting_controller(options(100, false), PollGate::new());
    controller.stop();
    controller.stop();
    controller.start();
    sleep(Duration::from_millis(150)).await;
    controller.stop();
    controller.stop();
    let after_stop = runs.load(Ordering::SeqCst);
    sleep(Duration::from_secs(1)).await;
    assert_eq!(runs.load(Ordering::SeqCst), after_stop);
}

#[tokio::test(start_paused = true)]
async fn hidden_gate_cancels_pending_tick() {
    let gate = PollGate::new();
    let (mut controller, runs) = counting_controller(options(100, false), gate.clone());
    controller.start();
    sleep(Duration::from_millis(50)).await;
    gate.set_hidden(true);
    assert!(gate.is_hidden());
    sleep(Duration::from_millis(500)).await;
    assert_eq!(runs.load(Ordering::SeqCst), 0, "no callbacks while hidden");
    assert!(controller.is_paused());
    assert!(controller.is_active(), "pausing must not deactivate");
}

#[tokio::test(start_paused = true)]
async fn visible_again_runs_catchup_then_resumes_schedule() {
    let gate = PollGate::new();
    let (mut controller, runs) = counting_controller(options(100, false), gate.clone());
    controller.start();
    gate.set_hidden(true);
    sleep(Duration::from_millis(300)).await;
    assert_eq!(runs.load(Ordering::SeqCst), 0);

    gate.set_hidden(false);
    sleep(Duration::from_millis(1)).await;
    // Exactly one catch-up invocation per shown transition.
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert!(!controller.is_paused());

    sleep(Duration::from_millis(150)).await;
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn repeated_hide_show_yields_one_catchup_each() {
    let gate = PollGate::new();
    let (mut controller, runs) = counting_controller(options(1_000, false), gate.clone());
    controller.start();

    for _ in 0..3 {
        gate.set_hidden(true);
        sleep(Duration::from_millis(10)).await;
        gate.set_hidden(false);
        sleep(Duration::from_millis(10)).await;
    }
    // Three shown transitions, no regular tick elapsed yet.
    assert_eq!(runs.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn starting_hidden_skips_immediate_run() {
    let gate = PollGate::new();
    gate.set_hidden(true);
    let (mut controller, runs) = counting_controller(options(100, true), gate.clone());
    controller.start();
    sleep(Duration::from_millis(500)).await;
    assert_eq!(runs.load(Ordering::SeqCst), 0);
    assert!(controller.is_paused());

    gate.set_hidden(false);
    sleep(Duration::from_millis(1)).await;
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn gate_ignored_when_pause_disabled() {
    let gate = PollGate::new();
    let opts = PollOptions { interval: Duration::from_millis(100), immediate: false, pause_when_hidden: false };
    let (mut controller, runs) = counting_controller(opts, gate.clone());
    controller.start();
    gate.set_hidden(true);
    sleep(Duration::from_millis(350)).await;
    assert_eq!(runs.load(Ordering::SeqCst), 3);
    assert!(!controller.is_paused());
}

#[tokio::test(start_paused = true)]
async fn poll_runs_out_of_band_without_resetting_schedule() {
    let (mut controller, runs) = counting_controller(options(100, false), PollGate::new());
    controller.start();
    sleep(Duration::from_millis(50)).await;
    controller.poll().await;
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    // The scheduled tick still fires at its original deadline.
    sleep(Duration::from_millis(60)).await;
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn poll_works_without_start() {
    let (controller, runs) = counting_controller(options(100, false), PollGate::new());
    controller.poll().await;
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn task_errors_do_not_stop_the_schedule() {
    let attempts = Arc::new(AtomicU32::new(0));
    let task = Arc::new(FailingTask { attempts: Arc::clone(&attempts) });
    let mut controller = PollingController::new(task, options(100, false), PollGate::new());
    controller.start();
    sleep(Duration::from_millis(350)).await;
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn on_error_hook_receives_failures() {
    let attempts = Arc::new(AtomicU32::new(0));
    let seen = Arc::new(AtomicU32::new(0));
    let task = Arc::new(FailingTask { attempts });
    let seen_hook = Arc::clone(&seen);
    let mut controller = PollingController::new(task, options(100, false), PollGate::new())
        .with_on_error(move |_| {
            seen_hook.fetch_add(1, Ordering::SeqCst);
        });
    controller.start();
    sleep(Duration::from_millis(250)).await;
    assert_eq!(seen.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn independent_controllers_do_not_interfere() {
    let gate = PollGate::new();
    let (mut fast, fast_runs) = counting_controller(options(100, false), gate.clone());
    let (mut slow, slow_runs) = counting_controller(options(300, false), gate.clone());
    fast.start();
    slow.start();
    sleep(Duration::from_millis(650)).await;
    assert_eq!(fast_runs.load(Ordering::SeqCst), 6);
    assert_eq!(slow_runs.load(Ordering::SeqCst), 2);
    fast.stop();
    sleep(Duration::from_millis(300)).await;
    assert_eq!(fast_runs.load(Ordering::SeqCst), 6);
    assert_eq!(slow_runs.load(Ordering::SeqCst), 3);
}
