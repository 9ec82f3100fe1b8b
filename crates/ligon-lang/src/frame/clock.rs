use std::time::{Duration, Instant};

/// Fixed-rate tick pacing.
///
/// `wait` sleeps until the next tick is due. If a tick overran, the schedule
/// is rebased on the current instant instead of bursting to catch up.
#[derive(Debug, Clone)]
pub struct FrameClock {
    period: Option<Duration>,
    next: Instant,
}

impl FrameClock {
    pub fn new(ticks_per_second: u32) -> Self {
        let period = Duration::from_secs_f64(1.0 / f64::from(ticks_per_second.max(1)));
        Self { period: Some(period), next: Instant::now() + period }
    }

    /// A clock that never sleeps. Used by headless runs and tests.
    pub fn unpaced() -> Self {
        Self { period: None, next: Instant::now() }
    }

    /// Block until the next tick is due.
    pub fn wait(&mut self) {
        let Some(period) = self.period else { return };

        let now = Instant::now();
        if now < self.next {
            std::thread::sleep(self.next - now);
            self.next += period;
        } else {
            self.next = now + period;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpaced_never_sleeps() {
        let mut clock = FrameClock::unpaced();
        let start = Instant::now();
        for _ in 0..1000 {
            clock.wait();
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn paced_clock_waits_a_period_per_tick() {
        let start = Instant::now();
        let mut clock = FrameClock::new(100);
        clock.wait();
        clock.wait();
        assert!(start.elapsed() >= Duration::from_millis(15));
    }
}
