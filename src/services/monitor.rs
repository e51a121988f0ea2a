// License: MIT

use std::sync::Arc;

use tokio::sync::mpsc::Sender;
use tokio::time::{sleep, Duration};

use crate::core::clock::ActivityClock;
use crate::core::daemon_msg::DaemonMsg;
use crate::core::event::Event;
use crate::core::monitor::InactivityMonitor;
use crate::core::utils::now_ms;

/// Periodic inactivity check for one tracking session. Runs until the
/// timeout fires or the task is aborted because the session closed.
///
/// Each tick compares wall-clock time against the activity clock, so a
/// machine that suspends and wakes past the threshold fires on the first
/// tick after resume.
pub async fn run_monitor(clock: Arc<ActivityClock>, threshold_secs: u64, tx: Sender<DaemonMsg>) {
    let mut latch = InactivityMonitor::new(threshold_secs);
    if !latch.enabled() {
        return;
    }

    tracing::debug!("inactivity monitor started ({threshold_secs}s)");

    loop {
        sleep(Duration::from_secs(1)).await;

        let idle_ms = clock.since_last_activity_ms(now_ms());
        if latch.observe(idle_ms) {
            // If the daemon is gone, there is nothing left to stop.
            let timeout = Event::InactivityTimeout { now_ms: now_ms() };
            if tx.send(DaemonMsg::Event(timeout)).await.is_err() {
                tracing::warn!("inactivity monitor stopping (receiver dropped)");
            }
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // Paused runtime: the 1-second tick resolves via auto-advance, so this
    // does not sleep for real.
    #[tokio::test(start_paused = true)]
    async fn stale_clock_fires_one_timeout_event() {
        let (tx, mut rx) = mpsc::channel(4);
        let clock = Arc::new(ActivityClock::new(now_ms().saturating_sub(5_000)));

        tokio::spawn(run_monitor(clock, 1, tx));

        let msg = rx.recv().await;
        assert!(matches!(
            msg,
            Some(DaemonMsg::Event(Event::InactivityTimeout { .. }))
        ));
        // The task exits after firing, so the channel closes without a
        // second event.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn zero_threshold_exits_without_sending() {
        let (tx, mut rx) = mpsc::channel(4);
        let clock = Arc::new(ActivityClock::new(now_ms()));

        run_monitor(clock, 0, tx).await;

        assert!(rx.try_recv().is_err());
    }
}
