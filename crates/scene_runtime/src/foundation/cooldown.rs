//! Rate limiting for script actions
//!
//! Replaces the `if elapsed > last + interval { last = elapsed; ... }`
//! bookkeeping scripts would otherwise repeat inline.

/// Fires an action at most once per `interval` seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    last_fire: f32,
    interval: f32,
}

impl Cooldown {
    /// Create a cooldown whose interval is measured from time `0.0`
    pub fn new(interval: f32) -> Self {
        Self::starting_at(interval, 0.0)
    }

    /// Create a cooldown whose interval is measured from `now`
    pub fn starting_at(interval: f32, now: f32) -> Self {
        Self {
            last_fire: now,
            interval,
        }
    }

    /// Create a cooldown that is ready on the first check
    pub fn ready_immediately(interval: f32) -> Self {
        Self::starting_at(interval, f32::NEG_INFINITY)
    }

    /// Whether the action may fire at `now`
    pub fn ready(&self, now: f32) -> bool {
        now - self.last_fire >= self.interval
    }

    /// Record a firing at `now`
    pub fn fire(&mut self, now: f32) {
        self.last_fire = now;
    }

    /// Fire if ready, returning whether it fired
    pub fn try_fire(&mut self, now: f32) -> bool {
        if self.ready(now) {
            self.fire(now);
            true
        } else {
            false
        }
    }

    /// Seconds left until the cooldown is ready (zero when ready)
    pub fn remaining(&self, now: f32) -> f32 {
        (self.interval - (now - self.last_fire)).max(0.0)
    }

    /// Restart the interval from `now` without firing
    pub fn reset(&mut self, now: f32) {
        self.last_fire = now;
    }

    /// Configured interval in seconds
    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Time of the last firing (or of construction/reset)
    pub fn last_fire(&self) -> f32 {
        self.last_fire
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_on_interval_boundaries() {
        let mut cooldown = Cooldown::new(1.0);
        let fired: Vec<bool> = [0.0, 0.5, 1.1, 2.2]
            .iter()
            .map(|&now| cooldown.try_fire(now))
            .collect();

        assert_eq!(fired, vec![false, false, true, true]);
    }

    #[test]
    fn test_fires_exactly_at_interval() {
        let mut cooldown = Cooldown::starting_at(1.0, 2.0);
        assert!(!cooldown.try_fire(2.999));
        assert!(cooldown.try_fire(3.0));
        assert_eq!(cooldown.last_fire(), 3.0);
    }

    #[test]
    fn test_never_fires_twice_within_interval() {
        let mut cooldown = Cooldown::ready_immediately(1.0);
        let mut fire_times = Vec::new();
        let mut now = 0.0_f32;
        while now < 10.0 {
            if cooldown.try_fire(now) {
                fire_times.push(now);
            }
            now += 0.07;
        }

        assert_eq!(fire_times.first(), Some(&0.0));
        for pair in fire_times.windows(2) {
            assert!(pair[1] - pair[0] >= 1.0);
        }
    }

    #[test]
    fn test_remaining() {
        let cooldown = Cooldown::new(2.0);
        assert_eq!(cooldown.remaining(0.5), 1.5);
        assert_eq!(cooldown.remaining(5.0), 0.0);
    }
}
