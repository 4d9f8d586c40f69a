//! Cancellable countdown timer
//!
//! [`start_countdown`] spawns a task that emits one [`TimerEvent::Tick`] per
//! period and a final [`TimerEvent::Expired`]. Cancelling or dropping the
//! [`TimerHandle`] stops the task; no further events are produced.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Countdown progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One period elapsed; `remaining` is never 0
    Tick { remaining: u32 },
    /// Countdown reached 0
    Expired,
}

/// Handle to a running countdown
#[derive(Debug)]
pub struct TimerHandle {
    task: JoinHandle<()>,
}

impl TimerHandle {
    /// Stop the countdown
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Whether the countdown task has stopped
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Count down from `secs`, one step per `period`
///
/// With `secs == 0` the countdown expires immediately. Must be called
/// inside a tokio runtime.
#[must_use]
pub fn start_countdown(secs: u32, period: Duration) -> (TimerHandle, mpsc::Receiver<TimerEvent>) {
    let (tx, rx) = mpsc::channel(secs as usize + 1);
    // interval panics on a zero period
    let period = period.max(Duration::from_millis(1));

    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.tick().await;

        let mut remaining = secs;
        while remaining > 0 {
            interval.tick().await;
            remaining -= 1;
            if remaining > 0 && tx.send(TimerEvent::Tick { remaining }).await.is_err() {
                return;
            }
        }
        let _ = tx.send(TimerEvent::Expired).await;
    });

    (TimerHandle { task }, rx)
}
