use std::time::Duration;

/// Frames-per-second meter fed with frame deltas.
///
/// Reports once per elapsed second of accumulated frame time.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frame_count: u32,
    accumulated: Duration,
    pub current_fps: f32,
}

impl FpsCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one frame lasting `delta`. Returns the new reading when a full
    /// second has accumulated.
    pub fn record(&mut self, delta: Duration) -> Option<f32> {
        self.frame_count += 1;
        self.accumulated += delta;

        if self.accumulated.as_secs_f32() >= 1.0 {
            self.current_fps = self.frame_count as f32 / self.accumulated.as_secs_f32();
            self.accumulated = Duration::ZERO;
            self.frame_count = 0;
            return Some(self.current_fps);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_after_one_second() {
        let mut fps = FpsCounter::new();
        let frame = Duration::from_millis(250);
        assert_eq!(fps.record(frame), None);
        assert_eq!(fps.record(frame), None);
        assert_eq!(fps.record(frame), None);
        let reading = fps.record(frame).unwrap();
        assert!((reading - 4.0).abs() < 1e-4);
    }
}
