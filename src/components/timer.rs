//! Deadline-based timers driven by an explicit clock.
//!
//! Neither timer owns a thread: the owner polls them with the current
//! `Instant`. Dropping a timer cancels it.

use std::time::{Duration, Instant};

/// Recurring timer firing once per `period`.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    next_fire: Instant,
}

impl IntervalTimer {
    pub fn start(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_fire: now + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of periods that elapsed since the last poll.
    pub fn poll(&mut self, now: Instant) -> u32 {
        if now < self.next_fire {
            return 0;
        }
        if self.period.is_zero() {
            self.next_fire = now;
            return 1;
        }

        let behind = now.duration_since(self.next_fire);
        let missed = behind.as_nanos() / self.period.as_nanos();
        let fired = u32::try_from(missed).unwrap_or(u32::MAX - 1) + 1;
        self.next_fire += self.period * fired;
        fired
    }
}

/// One-shot timer.
#[derive(Debug, Clone)]
pub struct Timeout {
    deadline: Instant,
    fired: bool,
}

impl Timeout {
    pub fn schedule(delay: Duration, now: Instant) -> Self {
        Self {
            deadline: now + delay,
            fired: false,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Returns true exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.fired || now < self.deadline {
            return false;
        }
        self.fired = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PERIOD: Duration = Duration::from_millis(500);

    #[test]
    fn test_interval_does_not_fire_early() {
        let t0 = Instant::now();
        let mut timer = IntervalTimer::start(PERIOD, t0);
        assert_eq!(timer.poll(t0), 0);
        assert_eq!(timer.poll(t0 + Duration::from_millis(499)), 0);
    }

    #[test]
    fn test_interval_fires_each_period() {
        let t0 = Instant::now();
        let mut timer = IntervalTimer::start(PERIOD, t0);
        assert_eq!(timer.poll(t0 + PERIOD), 1);
        assert_eq!(timer.poll(t0 + PERIOD), 0);
        assert_eq!(timer.poll(t0 + PERIOD * 2), 1);
        assert_eq!(timer.poll(t0 + PERIOD * 3 - Duration::from_millis(1)), 0);
    }

    #[test]
    fn test_interval_catches_up_missed_periods() {
        let t0 = Instant::now();
        let mut timer = IntervalTimer::start(PERIOD, t0);
        assert_eq!(timer.poll(t0 + Duration::from_millis(1700)), 3);
        assert_eq!(timer.poll(t0 + Duration::from_millis(1999)), 0);
        assert_eq!(timer.poll(t0 + PERIOD * 4), 1);
    }

    #[test]
    fn test_timeout_fires_once() {
        let t0 = Instant::now();
        let mut timeout = Timeout::schedule(PERIOD, t0);
        assert!(!timeout.poll(t0 + Duration::from_millis(100)));
        assert!(timeout.poll(t0 + PERIOD));
        assert!(!timeout.poll(t0 + PERIOD * 2));
        assert_eq!(timeout.deadline(), t0 + PERIOD);
    }
}
