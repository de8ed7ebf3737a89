//! Frame clock feeding delta time to flights and orbit damping.

use web_time::{Duration, Instant};

/// Step used for the very first frame, before any interval was measured.
pub const FIRST_FRAME_DT: f32 = 1.0 / 60.0;

/// Per-frame clock: elapsed time between frames plus a smoothed FPS.
pub struct FrameTiming {
    /// Previous frame timestamp (`None` until the first tick)
    last_frame: Option<Instant>,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    /// Upper bound on a single step, so a stalled tab does not jump
    max_dt: Duration,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Create a frame clock that has not ticked yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: None,
            smoothed_fps: 60.0,
            smoothing: 0.05,
            max_dt: Duration::from_millis(250),
        }
    }

    /// Mark the start of a frame and return the seconds since the previous
    /// one. The first call returns [`FIRST_FRAME_DT`].
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> f32 {
        let Some(last) = self.last_frame.replace(now) else {
            return FIRST_FRAME_DT;
        };
        let elapsed = now.saturating_duration_since(last).min(self.max_dt);
        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        frame_time
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_uses_default_step() {
        let mut timing = FrameTiming::new();
        assert_eq!(timing.tick(), FIRST_FRAME_DT);
    }

    #[test]
    fn later_ticks_measure_elapsed_time() {
        let mut timing = FrameTiming::new();
        let start = Instant::now();
        let _ = timing.tick_at(start);
        let dt = timing.tick_at(start + Duration::from_millis(20));
        assert!((dt - 0.02).abs() < 1e-6);
        // 50 FPS folded into the 60 FPS seed with factor 0.05.
        assert!((timing.fps() - 59.5).abs() < 1e-3);
    }

    #[test]
    fn fast_frames_raise_smoothed_fps() {
        let mut timing = FrameTiming::new();
        let start = Instant::now();
        let _ = timing.tick_at(start);
        let _ = timing.tick_at(start + Duration::from_millis(10));
        assert!((timing.fps() - 62.0).abs() < 1e-3);
    }

    #[test]
    fn long_stalls_are_capped() {
        let mut timing = FrameTiming::new();
        let start = Instant::now();
        let _ = timing.tick_at(start);
        let dt = timing.tick_at(start + Duration::from_secs(5));
        assert!((dt - 0.25).abs() < 1e-6);
    }
}
