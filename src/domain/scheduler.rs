//! Cancellable periodic timer that drives market updates.
//!
//! Each start bumps a generation counter. The background task re-checks the
//! state and generation under the same lock that [`Scheduler::stop`] takes,
//! so once `stop` returns no further tick runs.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

/// Shortest accepted period. Anything below is raised to this.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running,
}

type Tick = Arc<dyn Fn() + Send + Sync>;

struct Inner {
    state: SchedulerState,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

pub struct Scheduler {
    interval: Duration,
    tick: Tick,
    inner: Arc<Mutex<Inner>>,
}

impl Scheduler {
    pub fn new<F>(interval: Duration, tick: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Scheduler {
            interval: interval.max(MIN_INTERVAL),
            tick: Arc::new(tick),
            inner: Arc::new(Mutex::new(Inner {
                state: SchedulerState::Stopped,
                generation: 0,
                task: None,
            })),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> SchedulerState {
        self.inner.lock().state
    }

    pub fn is_running(&self) -> bool {
        self.state() == SchedulerState::Running
    }

    /// Arm the timer. Returns false if it was already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) -> bool {
        let mut inner = self.inner.lock();
        if inner.state == SchedulerState::Running {
            return false;
        }
        inner.generation += 1;
        inner.state = SchedulerState::Running;

        let generation = inner.generation;
        let shared = Arc::clone(&self.inner);
        let tick = Arc::clone(&self.tick);
        let period = self.interval;

        inner.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                // Held for the whole cycle so a concurrent stop waits for it.
                let guard = shared.lock();
                if guard.state != SchedulerState::Running || guard.generation != generation {
                    break;
                }
                tick();
            }
        }));

        tracing::info!(interval_secs = period.as_secs_f64(), "simulation started");
        true
    }

    /// Disarm the timer. Returns false if it was already stopped.
    pub fn stop(&self) -> bool {
        let mut inner = self.inner.lock();
        if inner.state == SchedulerState::Stopped {
            return false;
        }
        inner.state = SchedulerState::Stopped;
        if let Some(task) = inner.task.take() {
            task.abort();
        }
        tracing::info!("simulation stopped");
        true
    }

    /// Flip between running and stopped, returning the new state.
    pub fn toggle(&self) -> SchedulerState {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
        self.state()
    }

    pub fn has_pending_task(&self) -> bool {
        self.inner.lock().task.is_some()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if let Some(task) = self.inner.lock().task.take() {
            task.abort();
        }
    }
}
