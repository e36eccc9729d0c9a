//! Countdown timer for a drill attempt.
//!
//! [`CountdownTimer`] is the pure state machine: it counts whole seconds when
//! told to [`tick`](CountdownTimer::tick). [`SessionTimer`] drives it from a
//! tokio interval task and calls the time-up callback.
//!
//! Expiry fires at the tick where elapsed time first reaches the target
//! (remaining is exactly 0), once per timer instance. A reset does not re-arm
//! it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Run state of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running; nothing counted.
    Stopped,
    /// One second counted.
    Counted,
    /// One second counted and the target time was reached.
    Expired,
}

/// Elapsed/remaining second counter with start, pause, and reset.
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    target_time: u32,
    elapsed_seconds: u32,
    state: TimerState,
    expired: bool,
}

impl CountdownTimer {
    pub fn new(target_time: u32) -> Self {
        Self {
            target_time,
            elapsed_seconds: 0,
            state: TimerState::Idle,
            expired: false,
        }
    }

    /// Start or resume counting.
    pub fn start(&mut self) {
        self.state = TimerState::Running;
    }

    /// Stop counting, keeping the elapsed time.
    pub fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
    }

    /// Zero the elapsed time and stop.
    pub fn reset(&mut self) {
        self.elapsed_seconds = 0;
        self.state = TimerState::Idle;
    }

    /// Account for one elapsed second.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != TimerState::Running {
            return TickOutcome::Stopped;
        }
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        if !self.expired && self.elapsed_seconds >= self.target_time {
            self.expired = true;
            return TickOutcome::Expired;
        }
        TickOutcome::Counted
    }

    pub fn target_time(&self) -> u32 {
        self.target_time
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// `target_time - elapsed_seconds`; negative in overtime.
    pub fn remaining_seconds(&self) -> i64 {
        i64::from(self.target_time) - i64::from(self.elapsed_seconds)
    }

    pub fn is_overtime(&self) -> bool {
        self.remaining_seconds() < 0
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Whether expiry has already been reported.
    pub fn has_expired(&self) -> bool {
        self.expired
    }
}

type TimeUpCallback = Box<dyn FnOnce() + Send + 'static>;

/// Real-time driver around [`CountdownTimer`].
///
/// Must be started from within a tokio runtime. Pausing, resetting, or
/// dropping the timer aborts the ticker task.
pub struct SessionTimer {
    countdown: Arc<Mutex<CountdownTimer>>,
    on_time_up: Arc<Mutex<Option<TimeUpCallback>>>,
    ticker: Option<JoinHandle<()>>,
    period: Duration,
}

impl SessionTimer {
    /// Create a timer that calls `on_time_up` when `target_time` seconds
    /// have elapsed.
    pub fn new<F>(target_time: u32, on_time_up: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::with_period(target_time, Duration::from_secs(1), on_time_up)
    }

    /// Like [`SessionTimer::new`] with a custom tick period.
    pub fn with_period<F>(target_time: u32, period: Duration, on_time_up: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let on_time_up: TimeUpCallback = Box::new(on_time_up);
        Self {
            countdown: Arc::new(Mutex::new(CountdownTimer::new(target_time))),
            on_time_up: Arc::new(Mutex::new(Some(on_time_up))),
            ticker: None,
            period,
        }
    }

    /// Start or resume. No-op while already running.
    pub fn start(&mut self) {
        {
            let mut countdown = lock(&self.countdown);
            if countdown.is_running() {
                return;
            }
            countdown.start();
        }

        let countdown = Arc::clone(&self.countdown);
        let on_time_up = Arc::clone(&self.on_time_up);
        let period = self.period;

        self.ticker = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let outcome = lock(&countdown).tick();
                match outcome {
                    TickOutcome::Stopped => break,
                    TickOutcome::Counted => {}
                    TickOutcome::Expired => {
                        let callback = lock(&on_time_up).take();
                        if let Some(callback) = callback {
                            tracing::debug!("time is up");
                            callback();
                        }
                    }
                }
            }
        }));
    }

    /// Stop counting. No-op unless running.
    pub fn pause(&mut self) {
        lock(&self.countdown).pause();
        self.stop_ticker();
    }

    /// Zero the elapsed time and stop.
    pub fn reset(&mut self) {
        lock(&self.countdown).reset();
        self.stop_ticker();
    }

    pub fn elapsed_seconds(&self) -> u32 {
        lock(&self.countdown).elapsed_seconds()
    }

    pub fn remaining_seconds(&self) -> i64 {
        lock(&self.countdown).remaining_seconds()
    }

    pub fn is_overtime(&self) -> bool {
        lock(&self.countdown).is_overtime()
    }

    pub fn is_running(&self) -> bool {
        lock(&self.countdown).is_running()
    }

    pub fn target_time(&self) -> u32 {
        lock(&self.countdown).target_time()
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
