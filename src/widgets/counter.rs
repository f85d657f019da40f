//! Animated count-up for tutor statistics.

use std::time::Duration;

/// Time a counter takes to reach its target.
pub const COUNTER_DURATION: Duration = Duration::from_millis(2000);

/// A counter stepping from zero to `target` by one per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsCounter {
    target: u64,
    count: u64,
}

impl StatsCounter {
    pub fn new(target: u64) -> Self {
        Self { target, count: 0 }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_finished(&self) -> bool {
        self.count >= self.target
    }

    /// Delay between ticks: `floor(2000 / target)` ms, never below 1 ms.
    pub fn step_interval(&self) -> Duration {
        let total = COUNTER_DURATION.as_millis() as u64;
        if self.target == 0 {
            return COUNTER_DURATION;
        }
        Duration::from_millis((total / self.target).max(1))
    }

    /// Advance by one and return the value to display.
    pub fn tick(&mut self) -> u64 {
        if self.count < self.target {
            self.count += 1;
        }
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_interval() {
        assert_eq!(StatsCounter::new(0).step_interval(), Duration::from_millis(2000));
        assert_eq!(StatsCounter::new(1).step_interval(), Duration::from_millis(2000));
        assert_eq!(StatsCounter::new(3).step_interval(), Duration::from_millis(666));
        assert_eq!(StatsCounter::new(5000).step_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_passes_every_value_and_halts() {
        let mut counter = StatsCounter::new(5);
        let seen: Vec<u64> = (0..8).map(|_| counter.tick()).collect();
        assert_eq!(seen, [1, 2, 3, 4, 5, 5, 5, 5]);
        assert!(counter.is_finished());
    }

    #[test]
    fn test_zero_target_is_finished() {
        let mut counter = StatsCounter::new(0);
        assert!(counter.is_finished());
        assert_eq!(counter.tick(), 0);
    }
}
