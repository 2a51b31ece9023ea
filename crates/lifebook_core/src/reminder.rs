//! Reminder scheduling and bulk cancellation.
//!
//! # Responsibility
//! - Fire reminder callbacks at their due time on a dedicated timer thread.
//! - Cancel every pending reminder in one call during shutdown.
//!
//! # Invariants
//! - The state mutex is the single coordination point: fire callbacks run
//!   while it is held, so `stop_all` and a callback are mutually exclusive.
//! - After `stop_all` returns, no callback is running and none will run.
//! - `stop_all` is idempotent; calling it with nothing pending is a no-op.
//! - Fire callbacks must not call back into the scheduler.

use crate::model::calendar::Reminder;
use log::info;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Handle identity for one scheduled reminder.
pub type ScheduledId = Uuid;

/// Callback invoked on the timer thread when a reminder comes due.
pub type FireSink = Box<dyn Fn(&Reminder) + Send + 'static>;

/// Scheduling errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderError {
    /// The scheduler has been stopped and accepts no new reminders.
    SchedulerStopped,
}

impl Display for ReminderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SchedulerStopped => write!(f, "reminder scheduler is stopped"),
        }
    }
}

impl Error for ReminderError {}

/// Current unix time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

struct SchedulerState {
    pending: BTreeMap<ScheduledId, Reminder>,
    stopped: bool,
    sink: FireSink,
}

struct SchedulerShared {
    state: Mutex<SchedulerState>,
    cv: Condvar,
}

/// Timer-thread scheduler with bulk cancellation.
pub struct ReminderScheduler {
    shared: Arc<SchedulerShared>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl ReminderScheduler {
    /// Starts the timer thread with the given fire callback.
    pub fn new(sink: FireSink) -> Self {
        let shared = Arc::new(SchedulerShared {
            state: Mutex::new(SchedulerState {
                pending: BTreeMap::new(),
                stopped: false,
                sink,
            }),
            cv: Condvar::new(),
        });

        let worker = std::thread::Builder::new()
            .name("lifebook-reminders".to_owned())
            .spawn({
                let shared = Arc::clone(&shared);
                move || run_worker(&shared)
            })
            .expect("spawn reminder worker thread");

        Self {
            shared,
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Schedules one reminder; past-due reminders fire immediately on the
    /// timer thread.
    pub fn schedule(&self, reminder: Reminder) -> Result<ScheduledId, ReminderError> {
        let mut state = self
            .shared
            .state
            .lock()
            .expect("reminder scheduler lock poisoned");
        if state.stopped {
            return Err(ReminderError::SchedulerStopped);
        }

        let id = Uuid::new_v4();
        info!(
            "event=reminder_scheduled module=reminder status=ok id={id} due_at={}",
            reminder.due_at_epoch_ms
        );
        state.pending.insert(id, reminder);
        self.shared.cv.notify_all();
        Ok(id)
    }

    /// Cancels one pending reminder; returns whether it was still pending.
    pub fn cancel(&self, id: ScheduledId) -> bool {
        let mut state = self
            .shared
            .state
            .lock()
            .expect("reminder scheduler lock poisoned");
        state.pending.remove(&id).is_some()
    }

    pub fn pending_count(&self) -> usize {
        self.shared
            .state
            .lock()
            .expect("reminder scheduler lock poisoned")
            .pending
            .len()
    }

    /// Cancels every pending reminder and joins the timer thread.
    ///
    /// Safe to call repeatedly, and after every reminder has already fired.
    pub fn stop_all(&self) {
        {
            let mut state = self
                .shared
                .state
                .lock()
                .expect("reminder scheduler lock poisoned");
            if !state.stopped {
                state.stopped = true;
                let cancelled = state.pending.len();
                state.pending.clear();
                info!(
                    "event=reminders_stopped module=reminder status=ok cancelled={cancelled}"
                );
            }
            self.shared.cv.notify_all();
        }

        let handle = self
            .worker
            .lock()
            .expect("reminder scheduler lock poisoned")
            .take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.stop_all();
    }
}

fn run_worker(shared: &SchedulerShared) {
    let mut state = shared
        .state
        .lock()
        .expect("reminder scheduler lock poisoned");

    loop {
        if state.stopped {
            return;
        }

        let next_due = state
            .pending
            .iter()
            .min_by_key(|(_, reminder)| reminder.due_at_epoch_ms)
            .map(|(id, reminder)| (*id, reminder.due_at_epoch_ms));

        match next_due {
            None => {
                state = shared
                    .cv
                    .wait(state)
                    .expect("reminder scheduler lock poisoned");
            }
            Some((id, due_at)) => {
                let now = now_epoch_ms();
                if due_at <= now {
                    if let Some(reminder) = state.pending.remove(&id) {
                        info!(
                            "event=reminder_fired module=reminder status=ok id={id} due_at={due_at}"
                        );
                        // Held lock makes the callback mutually exclusive
                        // with stop_all and cancel.
                        (state.sink)(&reminder);
                    }
                } else {
                    let wait = Duration::from_millis((due_at - now) as u64);
                    let (guard, _timed_out) = shared
                        .cv
                        .wait_timeout(state, wait)
                        .expect("reminder scheduler lock poisoned");
                    state = guard;
                }
            }
        }
    }
}
