//! Remaining-time countdown for a task's end.
//!
//! The tracker shows how long a running task has left, refreshed once
//! per second. [`remaining`] is the pure computation; [`spawn`] drives
//! it on a tokio interval and stops ticking once the deadline passes.
//! Dropping (or cancelling) the handle aborts the ticker, so a display
//! that is torn down mid-countdown leaves nothing running.

use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use tokio::task::JoinHandle;
use tracing::debug;

/// Time left until `end`, clamped at zero once the deadline has passed.
pub fn remaining(end: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (end - now).max(Duration::zero())
}

/// Handle to a running countdown. Cancelling (or dropping) it stops the
/// ticker.
pub struct CountdownHandle {
    task: JoinHandle<()>,
}

impl CountdownHandle {
    /// Stops the countdown.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Whether the countdown has stopped, either by reaching the
    /// deadline or by cancellation.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawns a once-per-second countdown toward `end`.
///
/// `on_tick` receives the clamped remaining duration every second,
/// including a final zero tick, after which the task exits on its own.
/// Must be called from within a tokio runtime.
pub fn spawn<F>(end: DateTime<Utc>, mut on_tick: F) -> CountdownHandle
where
    F: FnMut(Duration) + Send + 'static,
{
    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(StdDuration::from_secs(1));
        loop {
            interval.tick().await;
            let left = remaining(end, Utc::now());
            on_tick(left);
            if left.is_zero() {
                debug!("countdown reached its deadline");
                break;
            }
        }
    });
    CountdownHandle { task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_remaining_clamps_at_zero() {
        let end = ts("2024-01-10T17:00:00Z");

        let before = ts("2024-01-10T16:59:30Z");
        assert_eq!(remaining(end, before), Duration::seconds(30));

        assert_eq!(remaining(end, end), Duration::zero());

        let after = ts("2024-01-10T18:00:00Z");
        assert_eq!(remaining(end, after), Duration::zero());
    }

    #[tokio::test]
    async fn test_countdown_stops_after_deadline() {
        // Deadline already passed: the first tick is zero and the task
        // exits on its own.
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&ticks);

        let handle = spawn(ts("2020-01-01T00:00:00Z"), move |left| {
            assert!(left.is_zero());
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(StdDuration::from_millis(50)).await;
        assert!(handle.is_finished());
        assert_eq!(ticks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancel_stops_ticker() {
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&ticks);

        // Far-future deadline: only cancellation can stop it.
        let handle = spawn(Utc::now() + Duration::hours(2), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(StdDuration::from_millis(50)).await;
        handle.cancel();
        tokio::time::sleep(StdDuration::from_millis(50)).await;

        assert!(handle.is_finished());
        // The immediate first tick fired; nothing after the cancel.
        assert_eq!(ticks.load(Ordering::SeqCst), 1);
    }
}
