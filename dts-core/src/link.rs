//! Link liveness monitor
//!
//! Decides when the start command has to be (re)sent. The monitor does
//! not talk to the UART itself; the caller performs the send and reports
//! back with [`LinkMonitor::record_send`] so a failed write leaves the
//! monitor untouched and the next tick retries.

/// What the periodic tick should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkAction {
    /// Link is alive, nothing to do
    Idle,
    /// No start command has been sent yet
    Start,
    /// Started, but silent for longer than the timeout
    Timeout { idle_ms: u32 },
}

/// Tracks the last successful send or receive
#[derive(Debug, Clone)]
pub struct LinkMonitor {
    started: bool,
    last_activity_ms: u32,
    timeout_ms: u32,
    retransmissions: u32,
}

impl LinkMonitor {
    /// Create a monitor with the given inactivity timeout
    pub const fn new(timeout_ms: u32) -> Self {
        Self {
            started: false,
            last_activity_ms: 0,
            timeout_ms,
            retransmissions: 0,
        }
    }

    /// Forget everything, as after power-up
    pub fn reset(&mut self) {
        self.started = false;
        self.last_activity_ms = 0;
        self.retransmissions = 0;
    }

    /// Evaluate the link at `now_ms`
    pub fn check(&self, now_ms: u32) -> LinkAction {
        if !self.started {
            return LinkAction::Start;
        }
        let idle_ms = now_ms.wrapping_sub(self.last_activity_ms);
        if idle_ms > self.timeout_ms {
            LinkAction::Timeout { idle_ms }
        } else {
            LinkAction::Idle
        }
    }

    /// A start command went out successfully
    pub fn record_send(&mut self, now_ms: u32) {
        if self.started {
            self.retransmissions = self.retransmissions.saturating_add(1);
        }
        self.started = true;
        self.last_activity_ms = now_ms;
    }

    /// Inbound traffic proved the link alive
    pub fn record_activity(&mut self, now_ms: u32) {
        self.last_activity_ms = now_ms;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn last_activity_ms(&self) -> u32 {
        self.last_activity_ms
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Start commands resent after the first one
    pub fn retransmissions(&self) -> u32 {
        self.retransmissions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: u32 = 10_000;

    #[test]
    fn test_first_tick_requests_start() {
        let monitor = LinkMonitor::new(TIMEOUT);
        assert_eq!(monitor.check(0), LinkAction::Start);
        assert_eq!(monitor.check(50_000), LinkAction::Start);
    }

    #[test]
    fn test_idle_within_timeout() {
        let mut monitor = LinkMonitor::new(TIMEOUT);
        monitor.record_send(1_000);
        assert_eq!(monitor.check(1_000), LinkAction::Idle);
        // Exactly at the timeout is still alive
        assert_eq!(monitor.check(11_000), LinkAction::Idle);
    }

    #[test]
    fn test_timeout_after_silence() {
        let mut monitor = LinkMonitor::new(TIMEOUT);
        monitor.record_send(1_000);
        assert_eq!(
            monitor.check(11_001),
            LinkAction::Timeout { idle_ms: 10_001 }
        );

        monitor.record_send(11_001);
        assert_eq!(monitor.check(11_002), LinkAction::Idle);
        assert_eq!(monitor.retransmissions(), 1);
    }

    #[test]
    fn test_activity_postpones_timeout() {
        let mut monitor = LinkMonitor::new(TIMEOUT);
        monitor.record_send(0);
        monitor.record_activity(9_000);
        assert_eq!(monitor.check(15_000), LinkAction::Idle);
        assert!(matches!(monitor.check(19_001), LinkAction::Timeout { .. }));
    }

    #[test]
    fn test_clock_wraparound() {
        let mut monitor = LinkMonitor::new(TIMEOUT);
        monitor.record_send(u32::MAX - 1_000);
        assert_eq!(monitor.check(5_000), LinkAction::Idle);
        assert_eq!(
            monitor.check(9_500),
            LinkAction::Timeout { idle_ms: 10_501 }
        );
    }

    #[test]
    fn test_reset() {
        let mut monitor = LinkMonitor::new(TIMEOUT);
        monitor.record_send(0);
        monitor.record_send(20_000);
        monitor.reset();
        assert!(!monitor.is_started());
        assert_eq!(monitor.retransmissions(), 0);
        assert_eq!(monitor.check(0), LinkAction::Start);
    }
}
