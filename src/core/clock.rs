use std::time::Instant;

/// Lap timer for frame deltas.
///
/// Starts lazily: nothing is measured until `start_if_idle` is called.
#[derive(Debug, Default)]
pub struct FrameTimer {
    last_reset: Option<Instant>,
}

impl FrameTimer {
    /// Create a stopped timer
    pub fn new() -> Self {
        Self { last_reset: None }
    }

    /// Start the timer unless it is already running.
    /// Returns true when this call started it.
    pub fn start_if_idle(&mut self) -> bool {
        if self.last_reset.is_some() {
            return false;
        }
        self.last_reset = Some(Instant::now());
        true
    }

    pub fn is_running(&self) -> bool {
        self.last_reset.is_some()
    }

    /// Seconds since the last reset, then restart from now.
    /// A stopped timer reports 0 and starts.
    pub fn lap(&mut self) -> f32 {
        let now = Instant::now();
        let delta = self
            .last_reset
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_reset = Some(now);
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn timer_starts_stopped() {
        let timer = FrameTimer::new();
        assert!(!timer.is_running());
    }

    #[test]
    fn start_is_idempotent() {
        let mut timer = FrameTimer::new();
        assert!(timer.start_if_idle());
        assert!(!timer.start_if_idle());
        assert!(timer.is_running());
    }

    #[test]
    fn timer_measures_lap() {
        let mut timer = FrameTimer::new();
        timer.start_if_idle();

        thread::sleep(Duration::from_millis(10));
        let delta = timer.lap();

        // Should be at least 10ms = 0.01s
        assert!(delta >= 0.009);
    }

    #[test]
    fn lap_restarts() {
        let mut timer = FrameTimer::new();
        timer.start_if_idle();

        thread::sleep(Duration::from_millis(10));
        timer.lap();

        let delta = timer.lap();
        // Should be very small since we just lapped
        assert!(delta < 0.005);
    }

    #[test]
    fn stopped_lap_is_zero() {
        let mut timer = FrameTimer::new();
        assert_eq!(timer.lap(), 0.0);
        assert!(timer.is_running());
    }
}
