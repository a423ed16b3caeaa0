use std::time::Duration;

/// Slowest selectable speed level
pub const SPEED_LEVEL_MIN: u8 = 0;
/// Fastest selectable speed level
pub const SPEED_LEVEL_MAX: u8 = 100;
/// Default speed level for a new session
pub const SPEED_LEVEL_DEFAULT: u8 = 80;
/// Interval added for each level below the maximum
pub const SPEED_STEP: Duration = Duration::from_millis(10);

/// User-facing speed as a percentage, inverted so higher means faster.
/// Always within [`SPEED_LEVEL_MIN`, `SPEED_LEVEL_MAX`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct SpeedLevel(u8);

impl SpeedLevel {
    pub const MIN: Self = Self(SPEED_LEVEL_MIN);
    pub const MAX: Self = Self(SPEED_LEVEL_MAX);

    /// Clamp any requested level into the valid range
    pub fn new(level: i32) -> Self {
        Self(level.clamp(i32::from(SPEED_LEVEL_MIN), i32::from(SPEED_LEVEL_MAX)) as u8)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Tick interval for this level: level 100 ticks back-to-back,
    /// level 0 waits one second between generations.
    pub fn interval(self) -> Duration {
        SPEED_STEP * u32::from(SPEED_LEVEL_MAX - self.0)
    }

    /// Display inverse of [`SpeedLevel::interval`], rounded to the nearest level
    pub fn from_interval(interval: Duration) -> Self {
        let steps = (interval.as_secs_f64() / SPEED_STEP.as_secs_f64()).round();
        let steps = steps.min(f64::from(SPEED_LEVEL_MAX)) as i32;
        Self::new(i32::from(SPEED_LEVEL_MAX) - steps)
    }

    /// Shift by a signed number of levels, clamping at the ends
    pub fn step(self, delta: i32) -> Self {
        Self::new(i32::from(self.0) + delta)
    }
}

impl Default for SpeedLevel {
    fn default() -> Self {
        Self(SPEED_LEVEL_DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_clamped() {
        assert_eq!(SpeedLevel::new(-25), SpeedLevel::MIN);
        assert_eq!(SpeedLevel::new(250), SpeedLevel::MAX);
        assert_eq!(SpeedLevel::new(-1).interval(), SpeedLevel::MIN.interval());
        assert_eq!(SpeedLevel::new(101).interval(), SpeedLevel::MAX.interval());
    }

    #[test]
    fn test_higher_level_is_faster() {
        assert!(SpeedLevel::new(90).interval() < SpeedLevel::new(10).interval());
        assert_eq!(SpeedLevel::MAX.interval(), Duration::ZERO);
        assert_eq!(SpeedLevel::MIN.interval(), Duration::from_secs(1));
        assert_eq!(SpeedLevel::new(80).interval(), Duration::from_millis(200));
    }

    #[test]
    fn test_from_interval_inverts_interval() {
        for level in 0..=100 {
            let speed = SpeedLevel::new(level);
            assert_eq!(SpeedLevel::from_interval(speed.interval()), speed);
        }
        assert_eq!(SpeedLevel::from_interval(Duration::from_secs(60)), SpeedLevel::MIN);
    }

    #[test]
    fn test_step_saturates() {
        assert_eq!(SpeedLevel::new(95).step(10), SpeedLevel::MAX);
        assert_eq!(SpeedLevel::new(5).step(-10), SpeedLevel::MIN);
        assert_eq!(SpeedLevel::new(50).step(5).value(), 55);
    }
}
