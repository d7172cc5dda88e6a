use std::time::{Duration, Instant};

/// Wall-clock source of per-frame deltas.
///
/// Only the delta leaves this type: the animation timeline itself is the mixer
/// time, which accumulates these deltas.
#[derive(Debug, Clone)]
pub struct Clock {
    last_tick: Instant,
    /// Time between the two most recent ticks.
    pub delta: Duration,
    /// Ticks since creation.
    pub frame_count: u64,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            delta: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Advances the clock and returns the delta in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta = now - self.last_tick;
        self.last_tick = now;
        self.frame_count += 1;
        self.delta.as_secs_f32()
    }
}
