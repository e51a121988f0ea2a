// License: MIT

/// One-shot inactivity latch.
///
/// Armed once per tracking session; `observe` reports `true` exactly once,
/// on the first observation where the idle time has reached the threshold,
/// and stays silent afterwards. A threshold of zero disables the latch
/// entirely. A delayed observation (system sleep) simply sees a larger idle
/// value and fires immediately, which is how sleep is detected as
/// inactivity.
#[derive(Debug)]
pub struct InactivityMonitor {
    threshold_ms: u64,
    fired: bool,
}

impl InactivityMonitor {
    pub fn new(threshold_secs: u64) -> Self {
        Self {
            threshold_ms: threshold_secs.saturating_mul(1000),
            fired: false,
        }
    }

    pub fn enabled(&self) -> bool {
        self.threshold_ms > 0
    }

    pub fn observe(&mut self, idle_ms: u64) -> bool {
        if !self.enabled() || self.fired {
            return false;
        }

        if idle_ms >= self.threshold_ms {
            self.fired = true;
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_exactly_once_at_threshold() {
        let mut monitor = InactivityMonitor::new(60);

        assert!(!monitor.observe(59_999));
        assert!(monitor.observe(60_000));
        assert!(!monitor.observe(61_000));
        assert!(!monitor.observe(3_600_000));
    }

    #[test]
    fn zero_threshold_never_fires() {
        let mut monitor = InactivityMonitor::new(0);

        assert!(!monitor.enabled());
        assert!(!monitor.observe(0));
        assert!(!monitor.observe(u64::MAX));
    }

    #[test]
    fn large_gap_fires_immediately() {
        let mut monitor = InactivityMonitor::new(60);

        assert!(!monitor.observe(1000));
        // e.g. the machine slept and the next observation is hours later
        assert!(monitor.observe(7_200_000));
    }
}
