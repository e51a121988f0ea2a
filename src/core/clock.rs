// License: MIT

use std::sync::atomic::{AtomicU64, Ordering};

/// Timestamp of the most recent observed user-input event, in ms since epoch.
///
/// Shared between the engine (which touches it on qualifying input while
/// tracking) and the inactivity monitor task (which reads it once a second),
/// so the field is atomic. `touch` keeps the value monotonically
/// non-decreasing even if producers race with slightly stale timestamps.
#[derive(Debug)]
pub struct ActivityClock {
    last_activity_ms: AtomicU64,
}

impl ActivityClock {
    pub fn new(now_ms: u64) -> Self {
        Self {
            last_activity_ms: AtomicU64::new(now_ms),
        }
    }

    pub fn touch(&self, now_ms: u64) {
        self.last_activity_ms.fetch_max(now_ms, Ordering::Relaxed);
    }

    pub fn last_activity_ms(&self) -> u64 {
        self.last_activity_ms.load(Ordering::Relaxed)
    }

    pub fn since_last_activity_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_activity_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_records_latest_activity() {
        let clock = ActivityClock::new(1000);
        clock.touch(5000);

        assert_eq!(clock.last_activity_ms(), 5000);
        assert_eq!(clock.since_last_activity_ms(12_000), 7000);
    }

    #[test]
    fn touch_never_goes_backwards() {
        let clock = ActivityClock::new(0);
        clock.touch(5000);
        clock.touch(3000);

        assert_eq!(clock.last_activity_ms(), 5000);
    }

    #[test]
    fn elapsed_saturates_at_zero() {
        let clock = ActivityClock::new(5000);
        assert_eq!(clock.since_last_activity_ms(4000), 0);
    }
}
