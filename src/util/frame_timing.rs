//! Frame clock for the redraw loop.

use web_time::{Duration, Instant};

/// Frames between FPS log lines.
const FPS_LOG_INTERVAL: u64 = 600;

/// Frame timing: elapsed time since start, smoothed FPS, and optional
/// frame limiting.
pub struct FrameTiming {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// When the clock started.
    start: Instant,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    frames: u64,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };
        let now = Instant::now();

        Self {
            target_fps,
            min_frame_duration,
            start: now,
            last_frame: now,
            smoothed_fps: 60.0,
            smoothing: 0.05,
            frames: 0,
        }
    }

    /// Returns true if enough time has passed since the last frame to
    /// render another.
    pub fn should_render(&self) -> bool {
        if self.target_fps == 0 {
            return true;
        }
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Milliseconds since the timer was created.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Call after rendering to update timing.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.frames += 1;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }

        if self.frames % FPS_LOG_INTERVAL == 0 {
            log::debug!("frame {}: {:.1} fps", self.frames, self.smoothed_fps);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_always_renders() {
        let timing = FrameTiming::new(0);
        assert!(timing.should_render());
    }

    #[test]
    fn limited_waits_for_frame_budget() {
        let mut timing = FrameTiming::new(1);
        timing.end_frame();
        assert!(!timing.should_render());
    }

    #[test]
    fn counts_frames_and_smooths_fps() {
        let mut timing = FrameTiming::new(0);
        timing.end_frame();
        timing.end_frame();
        assert_eq!(timing.frames, 2);
        assert!(timing.elapsed_ms() >= 0.0);
        assert!(timing.smoothed_fps > 0.0);
    }
}
