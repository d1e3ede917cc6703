//! Tick timer - a single cancellable gravity deadline
//!
//! The timer never owns a thread or a clock. Hosts pass a monotonic
//! millisecond timestamp in, which keeps every schedule decision testable.
//! Arming always replaces the pending deadline, so there is at most one.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickTimer {
    interval_ms: u32,
    deadline_ms: Option<u64>,
}

impl TickTimer {
    /// A disarmed timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending deadline and schedule the next tick `interval_ms` after `now_ms`.
    pub fn arm(&mut self, now_ms: u64, interval_ms: u32) {
        self.interval_ms = interval_ms;
        self.deadline_ms = Some(now_ms.saturating_add(interval_ms as u64));
    }

    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    /// Consume a due deadline and schedule the following one.
    ///
    /// At most one tick fires per call. If the host fell more than a whole
    /// interval behind, the missed ticks are dropped and the schedule restarts
    /// from `now_ms`.
    pub fn fire_if_due(&mut self, now_ms: u64) -> bool {
        let Some(deadline) = self.deadline_ms else {
            return false;
        };
        if now_ms < deadline {
            return false;
        }

        let interval = self.interval_ms as u64;
        let next = deadline.saturating_add(interval);
        self.deadline_ms = Some(if next <= now_ms {
            now_ms.saturating_add(interval)
        } else {
            next
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_never_fires() {
        let mut timer = TickTimer::new();
        assert!(!timer.is_armed());
        assert!(!timer.fire_if_due(u64::MAX));
    }

    #[test]
    fn test_fires_on_deadline_and_reschedules() {
        let mut timer = TickTimer::new();
        timer.arm(1_000, 700);

        assert!(!timer.fire_if_due(1_699));
        assert!(timer.fire_if_due(1_700));
        assert_eq!(timer.deadline_ms(), Some(2_400));
        assert!(!timer.fire_if_due(1_700));
    }

    #[test]
    fn test_late_poll_keeps_cadence() {
        let mut timer = TickTimer::new();
        timer.arm(0, 100);
        // 30ms late: the next deadline stays on the same grid.
        assert!(timer.fire_if_due(130));
        assert_eq!(timer.deadline_ms(), Some(200));
    }

    #[test]
    fn test_stalled_host_drops_missed_ticks() {
        let mut timer = TickTimer::new();
        timer.arm(0, 100);
        assert!(timer.fire_if_due(1_000));
        assert_eq!(timer.deadline_ms(), Some(1_100));
    }

    #[test]
    fn test_rearm_replaces_pending_deadline() {
        let mut timer = TickTimer::new();
        timer.arm(0, 700);
        timer.arm(300, 50);
        assert_eq!(timer.interval_ms(), 50);
        assert_eq!(timer.deadline_ms(), Some(350));
        assert!(!timer.fire_if_due(349));
        assert!(timer.fire_if_due(350));
    }

    #[test]
    fn test_cancel() {
        let mut timer = TickTimer::new();
        timer.arm(0, 10);
        timer.cancel();
        assert!(!timer.is_armed());
        assert!(!timer.fire_if_due(100));
    }
}
