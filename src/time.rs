//! Frame timing for the animation loop.
//!
//! [`FrameClock`] counts ticks and measures frame rate for the driver. Pausing
//! the clock freezes the jitter: the driver keeps rendering, but
//! [`Galaxy::tick`](crate::Galaxy::tick) skips perturbation while paused.
//!
//! ```
//! use galaxy::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//! clock.update();
//! assert_eq!(clock.frame(), 1);
//! ```

use std::time::{Duration, Instant};

/// Frame counter and FPS meter.
#[derive(Debug)]
pub struct FrameClock {
    last_frame: Instant,
    /// Time since the previous tick in seconds. Zero while paused.
    delta_secs: f32,
    /// Animated (unpaused) time in seconds.
    elapsed_secs: f32,
    /// Ticks since start, paused or not.
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    paused: bool,
    /// Fixed delta for deterministic runs (headless runner, tests).
    fixed_delta: Option<f32>,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta_secs: 0.0,
            elapsed_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
            fixed_delta: None,
        }
    }

    /// Advance one frame. Call once per tick.
    ///
    /// Returns the delta time in seconds.
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();
        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        self.delta_secs = if self.paused {
            0.0
        } else {
            self.fixed_delta.unwrap_or(raw_delta)
        };
        self.elapsed_secs += self.delta_secs;

        let since_fps = now.duration_since(self.fps_update_time);
        if since_fps >= self.fps_update_interval {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / since_fps.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta_secs
    }

    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Animated time in seconds. Does not advance while paused.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed every half second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Use a fixed delta instead of measured frame time. `None` restores
    /// real timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.elapsed(), 0.0);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_clock_update() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(5));
        let delta = clock.update();
        assert!(delta > 0.0);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_pause_freezes_elapsed_but_counts_frames() {
        let mut clock = FrameClock::new();
        clock.set_fixed_delta(Some(0.5));
        clock.update();
        clock.pause();
        clock.update();
        clock.update();

        assert_eq!(clock.elapsed(), 0.5);
        assert_eq!(clock.delta(), 0.0);
        assert_eq!(clock.frame(), 3);

        clock.toggle_pause();
        clock.update();
        assert_eq!(clock.elapsed(), 1.0);
    }

    #[test]
    fn test_fixed_delta() {
        let mut clock = FrameClock::new();
        clock.set_fixed_delta(Some(1.0 / 60.0));
        thread::sleep(Duration::from_millis(20));
        clock.update();
        assert!((clock.delta() - 1.0 / 60.0).abs() < 1e-6);
    }
}
