//! Frame timing for the render loop.
//!
//! One [`FrameClock`] drives the whole scene: each tick yields the elapsed
//! session time and a delta since the previous tick. The delta is capped at
//! [`MAX_DELTA`] so a stalled frame (window drag, tab in the background,
//! debugger pause) resumes as one slightly long step instead of hurling
//! every particle across the remaining distance.

use std::time::{Duration, Instant};

/// Largest delta a single tick may report, in seconds.
pub const MAX_DELTA: f32 = 0.1;

/// Per-frame time source for the scene update.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_tick: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
}

impl FrameClock {
    /// Clock starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
        }
    }

    /// Advance one frame. Returns `(elapsed, delta)` in seconds, with the
    /// delta already capped.
    pub fn tick(&mut self) -> (f32, f32) {
        let now = Instant::now();

        let raw_delta = now.duration_since(self.last_tick).as_secs_f32();
        self.delta_secs = raw_delta.min(MAX_DELTA);
        self.last_tick = now;

        self.elapsed_secs = now.duration_since(self.start).as_secs_f32();
        self.frame_count += 1;

        // Refresh the FPS estimate about twice a second.
        let fps_window = now.duration_since(self.fps_update_time);
        if fps_window >= Duration::from_millis(500) {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / fps_window.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        (self.elapsed_secs, self.delta_secs)
    }

    /// Total session time at the last tick, in seconds.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Capped delta of the last tick, in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Ticks since the clock started.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Smoothed frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
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
    fn test_clock_starts_at_zero() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.delta(), 0.0);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_tick_advances() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(10));
        let (elapsed, delta) = clock.tick();
        assert!(elapsed > 0.0);
        assert!(delta > 0.0);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_delta_is_capped_after_a_stall() {
        let mut clock = FrameClock::new();
        // Simulate a long stall by back-dating the last tick.
        clock.last_tick = Instant::now() - Duration::from_secs(3);
        let (_, delta) = clock.tick();
        assert!(delta <= MAX_DELTA + f32::EPSILON);
    }

    #[test]
    fn test_elapsed_keeps_real_time_despite_cap() {
        let mut clock = FrameClock::new();
        clock.last_tick = Instant::now() - Duration::from_secs(3);
        clock.start = Instant::now() - Duration::from_secs(3);
        let (elapsed, delta) = clock.tick();
        // The cap protects the step, not the wall clock.
        assert!(elapsed >= 2.9);
        assert!(delta <= MAX_DELTA + f32::EPSILON);
    }
}
