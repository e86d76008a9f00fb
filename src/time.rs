//! # Frame Timing

use std::time::{Duration, Instant};

// One dragged window or debugger pause should not inject seconds of elapsed
// time into scene updates.
const DT_CLAMP: Duration = Duration::from_millis(250);

/// Measures the seconds elapsed between frames.
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Forgets time elapsed so far; the next tick measures from now.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Seconds since the previous tick, clamped to 250 ms.
    pub fn tick(&mut self) -> f32 {
        self.step(Instant::now())
    }

    fn step(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.last).min(DT_CLAMP);
        self.last = now;
        elapsed.as_secs_f32()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
