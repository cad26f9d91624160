//! Interval timing
//!
//! The loop runs at frame rate, but hunger and similar slow pressures
//! tick on wall-clock seconds. `TickTimer` accumulates frame deltas and
//! reports how many whole intervals elapsed.

/// Fixed-interval ticker fed by frame deltas
#[derive(Debug, Clone)]
pub struct TickTimer {
    /// Total elapsed time in seconds
    elapsed: f32,
    /// Interval between ticks (in seconds)
    interval: f32,
    /// Time since the last tick fired
    since_last: f32,
}

impl TickTimer {
    /// Create a timer that fires every `interval` seconds
    pub fn new(interval: f32) -> Self {
        Self {
            elapsed: 0.0,
            interval: interval.max(f32::EPSILON),
            since_last: 0.0,
        }
    }

    /// Feed one frame delta in seconds
    ///
    /// Returns how many whole intervals fired, which can be more than
    /// one after a long stall.
    pub fn tick(&mut self, dt: f32) -> u32 {
        self.elapsed += dt;
        self.since_last += dt;

        let mut fired = 0;
        while self.since_last >= self.interval {
            self.since_last -= self.interval;
            fired += 1;
        }
        fired
    }

    /// Get total elapsed time
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Reset the timer
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.since_last = 0.0;
    }
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new(1.0) // Default: tick every second
    }
}
