use std::time::Duration;

/// Shortest gap between two ticks; a zero interval still yields to the host
/// loop between generations.
pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Schedule {
    interval: Duration,
    next_due: Duration,
}

/// Cooperative simulation clock.
///
/// The clock never sleeps or spawns anything: the host loop asks it with
/// [`SimulationClock::poll`] whether a tick is due at the current time.
/// Times are offsets from an arbitrary session epoch (macroquad's
/// `get_time()`, a test counter, ...).
///
/// A stopped clock holds no deadline at all. Re-arming always drops the
/// pending deadline first, so a pause or speed change can never let a stale
/// tick through.
#[derive(Clone, Debug, Default)]
pub struct SimulationClock {
    schedule: Option<Schedule>,
}

impl SimulationClock {
    pub const fn stopped() -> Self {
        Self { schedule: None }
    }

    /// Cancel the current series and start a new one from `now`.
    /// When running, the first tick is due immediately.
    pub fn rearm(&mut self, is_running: bool, interval: Duration, now: Duration) {
        self.schedule = is_running.then_some(Schedule {
            interval,
            next_due: now,
        });
    }

    pub fn is_running(&self) -> bool {
        self.schedule.is_some()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.schedule.map(|schedule| schedule.next_due)
    }

    /// Fire at most one tick due at `now`.
    ///
    /// After firing, the next deadline is one period after the fired one;
    /// if the host has fallen more than a period behind, the series restarts
    /// from `now` instead of bursting to catch up.
    pub fn poll(&mut self, now: Duration) -> bool {
        let Some(schedule) = self.schedule.as_mut() else {
            return false;
        };
        if schedule.next_due > now {
            return false;
        }

        let period = schedule.interval.max(MIN_TICK_PERIOD);
        let next_due = schedule.next_due + period;
        schedule.next_due = if next_due <= now { now + period } else { next_due };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_stopped_clock_never_ticks() {
        let mut clock = SimulationClock::stopped();
        assert!(!clock.poll(ms(0)));
        assert!(!clock.poll(ms(10_000)));
        assert_eq!(clock.next_due(), None);
    }

    #[test]
    fn test_first_tick_is_immediate() {
        let mut clock = SimulationClock::stopped();
        clock.rearm(true, ms(100), ms(50));
        assert!(clock.poll(ms(50)));
        assert!(!clock.poll(ms(50)));
        assert_eq!(clock.next_due(), Some(ms(150)));
    }

    #[test]
    fn test_ticks_follow_interval() {
        let mut clock = SimulationClock::stopped();
        clock.rearm(true, ms(100), ms(0));

        let fired: Vec<u64> = (0..=350)
            .step_by(10)
            .filter(|&t| clock.poll(ms(t)))
            .collect();
        assert_eq!(fired, vec![0, 100, 200, 300]);
    }

    #[test]
    fn test_stop_cancels_pending_tick() {
        let mut clock = SimulationClock::stopped();
        clock.rearm(true, ms(100), ms(0));
        assert!(clock.poll(ms(0)));

        clock.rearm(false, ms(100), ms(60));
        assert!(!clock.poll(ms(100)));
        assert!(!clock.is_running());
    }

    #[test]
    fn test_interval_change_restarts_from_now() {
        let mut clock = SimulationClock::stopped();
        clock.rearm(true, ms(1000), ms(0));
        assert!(clock.poll(ms(0)));

        clock.rearm(true, ms(20), ms(300));
        assert!(clock.poll(ms(300)));
        assert!(!clock.poll(ms(310)));
        assert!(clock.poll(ms(320)));
    }

    #[test]
    fn test_no_burst_after_stall() {
        let mut clock = SimulationClock::stopped();
        clock.rearm(true, ms(10), ms(0));
        assert!(clock.poll(ms(0)));

        assert!(clock.poll(ms(500)));
        assert!(!clock.poll(ms(500)));
        assert_eq!(clock.next_due(), Some(ms(510)));
    }

    #[test]
    fn test_zero_interval_fires_once_per_poll() {
        let mut clock = SimulationClock::stopped();
        clock.rearm(true, Duration::ZERO, ms(5));
        assert!(clock.poll(ms(5)));
        assert!(!clock.poll(ms(5)));
        assert!(clock.poll(ms(6)));
    }
}
